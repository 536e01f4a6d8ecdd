//! LOOK dispatch policy
//!
//! Combines the cost-based assignment with LOOK scanning. The policy owns
//! the request buffer, the ledger and the tracker; nothing else mutates
//! them.

use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use std::collections::HashMap;

use super::assignment::{assign, Assignment};
use super::ledger::RequestLedger;
use super::params::DispatchParams;
use super::policy::{Command, DispatchPolicy, ElevatorEvent};
use super::scan::{candidate_floors, select_next_target};
use super::tracker::ElevatorTracker;
use super::types::{Direction, ElevatorId, ElevatorSnapshot, Floor, PassengerId, Request};

#[derive(Debug, Clone, Default)]
pub struct LookPolicy {
    params: DispatchParams,
    ledger: RequestLedger,
    tracker: ElevatorTracker,
    /// Requests announced since the last cycle
    pending: Vec<Request>,
    /// Elevator each waiting passenger was assigned to
    owners: HashMap<PassengerId, ElevatorId>,
}

impl LookPolicy {
    pub fn new(params: DispatchParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn params(&self) -> &DispatchParams {
        &self.params
    }

    pub fn ledger(&self) -> &RequestLedger {
        &self.ledger
    }

    pub fn tracker(&self) -> &ElevatorTracker {
        &self.tracker
    }

    /// Requests still waiting for an assignment
    pub fn pending_requests(&self) -> &[Request] {
        &self.pending
    }

    /// Elevator a not-yet-boarded passenger is assigned to
    pub fn assigned_elevator(&self, passenger: PassengerId) -> Option<ElevatorId> {
        self.owners.get(&passenger).copied()
    }

    /// Passengers assigned to `elevator` that have not boarded yet
    pub fn waiting_passengers(&self, elevator: ElevatorId) -> Vec<PassengerId> {
        let mut passengers: Vec<PassengerId> = self
            .owners
            .iter()
            .filter(|(_, owner)| **owner == elevator)
            .map(|(passenger, _)| *passenger)
            .collect();
        passengers.sort();
        passengers
    }

    /// Run the assignment step on its own
    pub fn assign_pending(&mut self) -> Vec<Assignment> {
        let assignments = assign(
            &mut self.pending,
            &self.tracker,
            &mut self.ledger,
            &self.params,
        );
        for assignment in &assignments {
            self.owners.insert(assignment.passenger, assignment.elevator);
        }
        assignments
    }

    fn ensure_tracked(&self, elevator: ElevatorId) -> Result<()> {
        if !self.tracker.contains(elevator) {
            bail!("Notification for unknown elevator {}", elevator);
        }
        Ok(())
    }

    /// Select a target and turn it into a command if it changed
    fn retarget(&mut self, elevator: ElevatorId) -> Result<Option<Command>> {
        let previous = self
            .tracker
            .get(elevator)
            .with_context(|| format!("Elevator {} is not tracked", elevator))?
            .target;

        let next = self.next_target(elevator)?;

        Ok(match next {
            Some(floor) if Some(floor) != previous => Some(Command::move_to(elevator, floor)),
            _ => None,
        })
    }

    fn board(
        &mut self,
        elevator: ElevatorId,
        passenger: PassengerId,
        origin: Floor,
        destination: Floor,
    ) {
        // Boarded before the request was assigned: it must never become a call
        if let Some(index) = self.pending.iter().position(|r| r.passenger == passenger) {
            self.pending.remove(index);
            self.ledger.add_destination(elevator, destination);
            return;
        }

        let owner = self.owners.remove(&passenger).unwrap_or(elevator);
        if owner != elevator {
            debug!(
                "{} was assigned to {} but boarded {}",
                passenger, owner, elevator
            );
        }
        self.ledger.remove_call(owner, origin);
        self.ledger.add_destination(elevator, destination);
    }
}

impl DispatchPolicy for LookPolicy {
    fn on_init(&mut self, elevators: &[ElevatorSnapshot]) -> Vec<Command> {
        for snapshot in elevators {
            self.tracker.register(*snapshot);
            self.ledger.register(snapshot.id);
        }
        info!("LOOK dispatch initialised with {} elevator(s)", elevators.len());
        Vec::new()
    }

    fn on_request(&mut self, request: Request) {
        debug!(
            "{} calling at floor {} ({})",
            request.passenger, request.origin, request.direction
        );
        self.pending.push(request);
    }

    fn on_elevator_event(&mut self, event: ElevatorEvent) -> Result<Vec<Command>> {
        self.ensure_tracked(event.elevator())?;

        match event {
            ElevatorEvent::Stopped { elevator, floor } => {
                let reached = self.tracker.mark_stopped(elevator, floor)?;
                debug!(
                    "{} stopped at floor {}{}",
                    elevator,
                    floor,
                    if reached { " (target reached)" } else { "" }
                );
                Ok(Vec::new())
            }
            ElevatorEvent::Idle { elevator } => {
                // The environment has nothing queued for this car any more
                self.tracker.clear_target(elevator)?;
                Ok(self.retarget(elevator)?.into_iter().collect())
            }
            ElevatorEvent::PassengerBoarded {
                elevator,
                passenger,
                origin,
                destination,
            } => {
                self.board(elevator, passenger, origin, destination);
                Ok(Vec::new())
            }
            ElevatorEvent::PassengerAlighted {
                elevator,
                destination,
                ..
            } => {
                self.ledger.remove_destination(elevator, destination);
                Ok(Vec::new())
            }
        }
    }

    fn next_target(&mut self, elevator: ElevatorId) -> Result<Option<Floor>> {
        let state = *self
            .tracker
            .get(elevator)
            .with_context(|| format!("Elevator {} is not tracked", elevator))?;

        let Some(entry) = self.ledger.get(elevator).filter(|entry| !entry.is_empty()) else {
            self.tracker.set_direction(elevator, Direction::Stopped)?;
            return Ok(None);
        };

        let candidates = candidate_floors(entry, state.snapshot.is_full);
        match select_next_target(state.floor(), state.direction, &candidates) {
            Some(target) => {
                let direction = self.tracker.set_target(elevator, target)?;
                debug!("{} next target: floor {} ({})", elevator, target, direction);
                Ok(Some(target))
            }
            None => {
                warn!(
                    "{} has pending requests but no reachable target, holding at floor {}",
                    elevator,
                    state.floor()
                );
                Ok(None)
            }
        }
    }

    fn on_tick_end(&mut self, elevators: &[ElevatorSnapshot]) -> Vec<Command> {
        for snapshot in elevators {
            self.tracker.observe(*snapshot);
            self.ledger.register(snapshot.id);
        }

        self.assign_pending();

        let mut commands = Vec::new();
        for elevator in self.tracker.elevator_ids() {
            if self.ledger.is_empty(elevator) {
                if let Err(e) = self.tracker.set_direction(elevator, Direction::Stopped) {
                    warn!("{:#}", e);
                }
                continue;
            }

            let needs_target = self
                .tracker
                .get(elevator)
                .is_some_and(|state| state.needs_target());
            if !needs_target {
                continue;
            }

            match self.retarget(elevator) {
                Ok(Some(command)) => commands.push(command),
                Ok(None) => {}
                Err(e) => warn!("Failed to retarget {}: {:#}", elevator, e),
            }
        }

        commands
    }
}
