//! Request ledger
//!
//! Per-elevator counted sets of call floors (waiting passengers assigned to
//! the elevator) and destination floors (passengers on board). A floor whose
//! count drops to zero is removed, so the keys are exactly the floors the
//! elevator must stop at.

use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::types::{ElevatorId, Floor};

/// A multiset of floors backed by floor -> pending count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloorCounts {
    counts: BTreeMap<Floor, u32>,
}

impl FloorCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, floor: Floor) {
        *self.counts.entry(floor).or_insert(0) += 1;
    }

    /// Decrement the count at `floor`
    /// Returns false if the floor was not present
    pub fn remove(&mut self, floor: Floor) -> bool {
        let Some(count) = self.counts.get_mut(&floor) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&floor);
        }
        true
    }

    pub fn count(&self, floor: Floor) -> u32 {
        self.counts.get(&floor).copied().unwrap_or(0)
    }

    pub fn contains(&self, floor: Floor) -> bool {
        self.counts.contains_key(&floor)
    }

    /// Floors with a non-zero count, ascending
    pub fn floors(&self) -> impl Iterator<Item = Floor> + '_ {
        self.counts.keys().copied()
    }

    /// Sum of all counts
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Calls and destinations of a single elevator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloorLedger {
    pub calls: FloorCounts,
    pub destinations: FloorCounts,
}

impl FloorLedger {
    /// Union of call and destination floors
    pub fn requested_floors(&self) -> BTreeSet<Floor> {
        self.calls.floors().chain(self.destinations.floors()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.destinations.is_empty()
    }
}

/// Ledgers for the whole fleet
#[derive(Debug, Clone, Default)]
pub struct RequestLedger {
    entries: HashMap<ElevatorId, FloorLedger>,
}

impl RequestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure an (empty) entry exists for `elevator`
    pub fn register(&mut self, elevator: ElevatorId) {
        self.entries.entry(elevator).or_default();
    }

    pub fn add_call(&mut self, elevator: ElevatorId, floor: Floor) {
        self.entries.entry(elevator).or_default().calls.add(floor);
    }

    pub fn remove_call(&mut self, elevator: ElevatorId, floor: Floor) {
        let removed = self
            .entries
            .get_mut(&elevator)
            .is_some_and(|entry| entry.calls.remove(floor));
        if !removed {
            debug!("{}: no pending call at floor {} to remove", elevator, floor);
        }
    }

    pub fn add_destination(&mut self, elevator: ElevatorId, floor: Floor) {
        self.entries
            .entry(elevator)
            .or_default()
            .destinations
            .add(floor);
    }

    pub fn remove_destination(&mut self, elevator: ElevatorId, floor: Floor) {
        let removed = self
            .entries
            .get_mut(&elevator)
            .is_some_and(|entry| entry.destinations.remove(floor));
        if !removed {
            debug!("{}: no pending destination at floor {} to remove", elevator, floor);
        }
    }

    /// Every floor `elevator` must stop at
    pub fn requested_floors(&self, elevator: ElevatorId) -> BTreeSet<Floor> {
        self.entries
            .get(&elevator)
            .map(FloorLedger::requested_floors)
            .unwrap_or_default()
    }

    pub fn get(&self, elevator: ElevatorId) -> Option<&FloorLedger> {
        self.entries.get(&elevator)
    }

    pub fn calls(&self, elevator: ElevatorId) -> BTreeSet<Floor> {
        self.entries
            .get(&elevator)
            .map(|entry| entry.calls.floors().collect())
            .unwrap_or_default()
    }

    pub fn destinations(&self, elevator: ElevatorId) -> BTreeSet<Floor> {
        self.entries
            .get(&elevator)
            .map(|entry| entry.destinations.floors().collect())
            .unwrap_or_default()
    }

    /// Number of pending stops (calls plus destinations, with multiplicity)
    pub fn pending_count(&self, elevator: ElevatorId) -> u32 {
        self.entries
            .get(&elevator)
            .map(|entry| entry.calls.total() + entry.destinations.total())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, elevator: ElevatorId) -> bool {
        self.entries
            .get(&elevator)
            .map_or(true, FloorLedger::is_empty)
    }
}
