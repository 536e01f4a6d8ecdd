//! Core types for the dispatch engine
//!
//! Identifiers, directions and the read-only views the engine works with.

use std::fmt;

/// A building floor, counted from the ground floor at 0
pub type Floor = u32;

/// A wrapper type for elevator IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElevatorId(pub usize);

/// A wrapper type for passenger IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassengerId(pub usize);

impl fmt::Display for ElevatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Travel direction of an elevator or requested direction of a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    /// No directional bias
    #[default]
    Stopped,
}

impl Direction {
    /// Direction needed to travel from `from` to `to`, `None` when they are equal
    pub fn between(from: Floor, to: Floor) -> Option<Direction> {
        if to > from {
            Some(Direction::Up)
        } else if to < from {
            Some(Direction::Down)
        } else {
            None
        }
    }

    /// Whether `floor` lies ahead of (or at) `from` when travelling in this direction
    pub fn is_ahead_or_at(&self, from: Floor, floor: Floor) -> bool {
        match self {
            Direction::Up => floor >= from,
            Direction::Down => floor <= from,
            Direction::Stopped => true,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Stopped => "stopped",
        };
        f.write_str(label)
    }
}

/// A pickup request announced by the environment
///
/// The destination is not part of the request: it only becomes known when
/// the passenger boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub passenger: PassengerId,
    pub origin: Floor,
    pub direction: Direction,
}

impl Request {
    pub fn new(passenger: PassengerId, origin: Floor, direction: Direction) -> Self {
        Self {
            passenger,
            origin,
            direction,
        }
    }
}

/// What the environment reports about one elevator at the start of a cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevatorSnapshot {
    pub id: ElevatorId,
    /// Position in floors, fractional while travelling between floors
    pub position: f32,
    pub passenger_count: usize,
    pub is_full: bool,
}

impl ElevatorSnapshot {
    pub fn new(id: ElevatorId, position: f32, passenger_count: usize, is_full: bool) -> Self {
        Self {
            id,
            position,
            passenger_count,
            is_full,
        }
    }

    /// Snapshot of an empty elevator resting at `floor`
    pub fn idle_at(id: ElevatorId, floor: Floor) -> Self {
        Self::new(id, floor as f32, 0, false)
    }

    /// The floor-aligned value decisions are made on
    pub fn floor(&self) -> Floor {
        self.position.max(0.0).floor() as Floor
    }

    /// The floor the car is resting on, `None` while between floors
    pub fn resting_floor(&self) -> Option<Floor> {
        if self.position >= 0.0 && self.position.fract() == 0.0 {
            Some(self.position as Floor)
        } else {
            None
        }
    }
}
