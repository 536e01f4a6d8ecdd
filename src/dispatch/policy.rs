//! The boundary between a dispatch policy and its environment
//!
//! The environment feeds requests and elevator events in and applies the
//! commands that come back. How those travel (HTTP, channels, an in-process
//! simulation) is up to the adapter.

use anyhow::Result;

use super::types::{ElevatorId, ElevatorSnapshot, Floor, PassengerId, Request};

/// Elevator-side notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorEvent {
    /// The elevator stopped at a floor
    Stopped { elevator: ElevatorId, floor: Floor },
    /// The elevator has nothing left to do
    Idle { elevator: ElevatorId },
    /// A passenger stepped in; the destination is known from now on
    PassengerBoarded {
        elevator: ElevatorId,
        passenger: PassengerId,
        origin: Floor,
        destination: Floor,
    },
    /// A passenger left the elevator at its destination
    PassengerAlighted {
        elevator: ElevatorId,
        passenger: PassengerId,
        destination: Floor,
    },
}

impl ElevatorEvent {
    pub fn elevator(&self) -> ElevatorId {
        match *self {
            ElevatorEvent::Stopped { elevator, .. }
            | ElevatorEvent::Idle { elevator }
            | ElevatorEvent::PassengerBoarded { elevator, .. }
            | ElevatorEvent::PassengerAlighted { elevator, .. } => elevator,
        }
    }
}

/// Everything the environment can tell a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    RequestArrived(Request),
    Elevator(ElevatorEvent),
}

/// Commands issued back to the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveToFloor {
        elevator: ElevatorId,
        floor: Floor,
        /// Replace the current target right away instead of queueing
        immediate: bool,
    },
}

impl Command {
    pub fn move_to(elevator: ElevatorId, floor: Floor) -> Self {
        Command::MoveToFloor {
            elevator,
            floor,
            immediate: false,
        }
    }
}

/// A dispatch strategy
///
/// Implementations own all of their bookkeeping. A driver calls `on_init`
/// once, then per tick: `on_request` / `on_elevator_event` for each
/// notification followed by a single `on_tick_end`.
pub trait DispatchPolicy {
    /// Start tracking the fleet
    fn on_init(&mut self, elevators: &[ElevatorSnapshot]) -> Vec<Command>;

    /// Buffer a new pickup request until the end of the tick
    fn on_request(&mut self, request: Request);

    /// Apply an elevator notification
    ///
    /// May answer with commands right away (an idle elevator gets a target
    /// without waiting for the cycle boundary).
    fn on_elevator_event(&mut self, event: ElevatorEvent) -> Result<Vec<Command>>;

    /// Select (and commit) the next target of one elevator
    fn next_target(&mut self, elevator: ElevatorId) -> Result<Option<Floor>>;

    /// Close the decision cycle: assign buffered requests, then retarget
    fn on_tick_end(&mut self, elevators: &[ElevatorSnapshot]) -> Vec<Command>;

    /// Route a notification to the matching handler
    fn notify(&mut self, notification: Notification) -> Result<Vec<Command>> {
        match notification {
            Notification::RequestArrived(request) => {
                self.on_request(request);
                Ok(Vec::new())
            }
            Notification::Elevator(event) => self.on_elevator_event(event),
        }
    }
}
