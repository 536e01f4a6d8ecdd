//! Building configuration for the headless harness

use anyhow::{bail, Result};

use crate::dispatch::Floor;

/// Number of floors in the default building
pub const DEFAULT_FLOORS: u32 = 10;
/// Number of elevators in the default building
pub const DEFAULT_ELEVATORS: usize = 3;
/// Passengers an elevator can carry at once
pub const DEFAULT_CAPACITY: usize = 8;
/// Floors travelled per tick
pub const DEFAULT_SPEED: f32 = 0.5;
/// Probability that a new passenger appears on a given tick
pub const DEFAULT_SPAWN_RATE: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingConfig {
    pub floors: u32,
    pub elevators: usize,
    pub capacity: usize,
    pub speed: f32,
    pub spawn_rate: f64,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            floors: DEFAULT_FLOORS,
            elevators: DEFAULT_ELEVATORS,
            capacity: DEFAULT_CAPACITY,
            speed: DEFAULT_SPEED,
            spawn_rate: DEFAULT_SPAWN_RATE,
        }
    }
}

impl BuildingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.floors < 2 {
            bail!("A building needs at least 2 floors, got {}", self.floors);
        }
        if self.elevators == 0 {
            bail!("A building needs at least one elevator");
        }
        if self.capacity == 0 {
            bail!("Elevator capacity must be positive");
        }
        if !(self.speed > 0.0 && self.speed <= 1.0) {
            bail!("Speed must be in (0, 1] floors per tick, got {}", self.speed);
        }
        if !(0.0..=1.0).contains(&self.spawn_rate) {
            bail!("Spawn rate must be a probability, got {}", self.spawn_rate);
        }
        Ok(())
    }

    pub fn contains_floor(&self, floor: Floor) -> bool {
        floor < self.floors
    }
}
