//! Elevator car movement for the headless harness
//!
//! Constant speed, no acceleration and no door timing: a car arrives, lets
//! passengers off and on within the same tick, and moves on.

use crate::dispatch::{ElevatorId, ElevatorSnapshot, Floor};

use super::passenger::SimPassenger;

/// Result of an elevator update indicating what the world should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorUpdateResult {
    Moving,                 // Still travelling towards its target
    Arrived(Floor),         // Reached its target this tick
    BecameIdle,             // Nothing to do, reported once
    Resting,                // Still idle
}

#[derive(Debug, Clone)]
pub struct SimElevator {
    pub id: ElevatorId,
    pub position: f32,
    pub target: Option<Floor>,
    /// Target taken up once the current one is reached
    pub queued: Option<Floor>,
    pub passengers: Vec<SimPassenger>,
    pub capacity: usize,
    idle_reported: bool,
}

impl SimElevator {
    pub fn new(id: ElevatorId, floor: Floor, capacity: usize) -> Self {
        Self {
            id,
            position: floor as f32,
            target: None,
            queued: None,
            passengers: Vec::new(),
            capacity,
            idle_reported: false,
        }
    }

    pub fn is_full(&self) -> bool {
        self.passengers.len() >= self.capacity
    }

    pub fn free_space(&self) -> usize {
        self.capacity.saturating_sub(self.passengers.len())
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot::new(self.id, self.position, self.passengers.len(), self.is_full())
    }

    /// Accept a move command
    pub fn command(&mut self, floor: Floor, immediate: bool) {
        if immediate || self.target.is_none() {
            self.target = Some(floor);
        } else {
            self.queued = Some(floor);
        }
        self.idle_reported = false;
    }

    /// Advance the car by `speed` floors
    pub fn update(&mut self, speed: f32) -> ElevatorUpdateResult {
        let target = match self.target.or_else(|| self.queued.take()) {
            Some(target) => target,
            None if self.idle_reported => return ElevatorUpdateResult::Resting,
            None => {
                self.idle_reported = true;
                return ElevatorUpdateResult::BecameIdle;
            }
        };
        self.target = Some(target);

        let goal = target as f32;
        let remaining = goal - self.position;

        if remaining.abs() <= speed {
            // Snap onto the floor so the car rests on an exact value
            self.position = goal;
            self.target = self.queued.take();
            return ElevatorUpdateResult::Arrived(target);
        }

        self.position += speed * remaining.signum();
        ElevatorUpdateResult::Moving
    }

    /// Remove and return the passengers whose destination is `floor`
    pub fn unload(&mut self, floor: Floor) -> Vec<SimPassenger> {
        let (leaving, staying): (Vec<_>, Vec<_>) = self
            .passengers
            .drain(..)
            .partition(|passenger| passenger.destination == floor);
        self.passengers = staying;
        leaving
    }
}
