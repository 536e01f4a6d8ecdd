//! Dispatch parameters for the assignment cost model

/// Weight applied to the floor distance between elevator and caller
pub const DEFAULT_ALPHA: f64 = 1.0;
/// Weight applied to the number of passengers already on board
pub const DEFAULT_BETA: f64 = 0.5;
/// Weight applied to the direction penalty
pub const DEFAULT_GAMMA: f64 = 2.0;

/// Penalty for a same-direction elevator that has already passed the caller
pub const DEFAULT_BEHIND_PENALTY: f64 = 10.0;
/// Penalty for an elevator travelling opposite to the requested direction
pub const DEFAULT_OPPOSITE_PENALTY: f64 = 100.0;

/// Static weights of the assignment cost model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchParams {
    /// Distance weight (α)
    pub alpha: f64,
    /// Load weight (β)
    pub beta: f64,
    /// Direction penalty weight (γ)
    pub gamma: f64,
    /// Same direction but behind (K)
    pub behind_penalty: f64,
    /// Opposite direction (M)
    pub opposite_penalty: f64,
}

impl Default for DispatchParams {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            gamma: DEFAULT_GAMMA,
            behind_penalty: DEFAULT_BEHIND_PENALTY,
            opposite_penalty: DEFAULT_OPPOSITE_PENALTY,
        }
    }
}

impl DispatchParams {
    /// Parameters that score on distance alone
    pub fn distance_only() -> Self {
        Self {
            alpha: 1.0,
            beta: 0.0,
            gamma: 0.0,
            ..Self::default()
        }
    }
}
