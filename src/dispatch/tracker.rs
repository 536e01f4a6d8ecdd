//! Elevator state tracking
//!
//! Single owner of per-elevator direction, committed target and the latest
//! snapshot reported by the environment.

use anyhow::{Context, Result};
use std::collections::BTreeMap;

use super::types::{Direction, ElevatorId, ElevatorSnapshot, Floor};

/// Tracked state of one elevator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevatorState {
    pub snapshot: ElevatorSnapshot,
    pub direction: Direction,
    pub target: Option<Floor>,
}

impl ElevatorState {
    pub fn new(snapshot: ElevatorSnapshot) -> Self {
        Self {
            snapshot,
            direction: Direction::Stopped,
            target: None,
        }
    }

    pub fn id(&self) -> ElevatorId {
        self.snapshot.id
    }

    pub fn floor(&self) -> Floor {
        self.snapshot.floor()
    }

    /// True when a fresh target should be selected
    ///
    /// A target only counts as reached once the car rests on it; a car
    /// descending through the floor below its target must not re-plan early.
    pub fn needs_target(&self) -> bool {
        match self.target {
            None => true,
            Some(target) => self.snapshot.resting_floor() == Some(target),
        }
    }
}

/// States of the whole fleet, iterated in ascending elevator id order
#[derive(Debug, Clone, Default)]
pub struct ElevatorTracker {
    states: BTreeMap<ElevatorId, ElevatorState>,
}

impl ElevatorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking an elevator, keeping any existing direction and target
    pub fn register(&mut self, snapshot: ElevatorSnapshot) {
        self.states
            .entry(snapshot.id)
            .and_modify(|state| state.snapshot = snapshot)
            .or_insert_with(|| ElevatorState::new(snapshot));
    }

    /// Refresh position and load from the environment
    pub fn observe(&mut self, snapshot: ElevatorSnapshot) {
        self.register(snapshot);
    }

    pub fn get(&self, elevator: ElevatorId) -> Option<&ElevatorState> {
        self.states.get(&elevator)
    }

    fn get_mut(&mut self, elevator: ElevatorId) -> Result<&mut ElevatorState> {
        self.states
            .get_mut(&elevator)
            .with_context(|| format!("Elevator {} is not tracked", elevator))
    }

    pub fn contains(&self, elevator: ElevatorId) -> bool {
        self.states.contains_key(&elevator)
    }

    pub fn elevator_ids(&self) -> Vec<ElevatorId> {
        self.states.keys().copied().collect()
    }

    pub fn states(&self) -> impl Iterator<Item = &ElevatorState> {
        self.states.values()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn set_direction(&mut self, elevator: ElevatorId, direction: Direction) -> Result<()> {
        self.get_mut(elevator)?.direction = direction;
        Ok(())
    }

    /// Commit a new target and derive the direction from it
    ///
    /// A target equal to the current floor leaves the direction unchanged.
    pub fn set_target(&mut self, elevator: ElevatorId, target: Floor) -> Result<Direction> {
        let state = self.get_mut(elevator)?;
        state.target = Some(target);
        if let Some(direction) = Direction::between(state.floor(), target) {
            state.direction = direction;
        }
        Ok(state.direction)
    }

    pub fn clear_target(&mut self, elevator: ElevatorId) -> Result<()> {
        self.get_mut(elevator)?.target = None;
        Ok(())
    }

    /// Record that the elevator stopped at `floor`
    /// Returns true if that floor was its committed target
    pub fn mark_stopped(&mut self, elevator: ElevatorId, floor: Floor) -> Result<bool> {
        let state = self.get_mut(elevator)?;
        state.snapshot.position = floor as f32;
        let reached = state.target == Some(floor);
        if reached {
            state.target = None;
        }
        Ok(reached)
    }
}
