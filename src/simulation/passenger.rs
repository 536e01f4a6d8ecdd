//! Passengers of the headless harness

use crate::dispatch::{Direction, Floor, PassengerId, Request};

/// A passenger in the simulation
///
/// The harness knows every passenger's destination from the start, but the
/// dispatcher only learns it on boarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimPassenger {
    pub id: PassengerId,
    pub origin: Floor,
    pub destination: Floor,
    pub spawned_at: u64,
    pub boarded_at: Option<u64>,
}

impl SimPassenger {
    pub fn new(id: PassengerId, origin: Floor, destination: Floor, spawned_at: u64) -> Self {
        Self {
            id,
            origin,
            destination,
            spawned_at,
            boarded_at: None,
        }
    }

    pub fn direction(&self) -> Direction {
        if self.destination > self.origin {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// The pickup request announced for this passenger
    pub fn request(&self) -> Request {
        Request::new(self.id, self.origin, self.direction())
    }
}
