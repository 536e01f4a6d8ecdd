//! Assignment-and-scan dispatch engine
//!
//! Decides which elevator serves each pickup request and which floor every
//! elevator heads to next. The engine never talks to an elevator directly:
//! it consumes notifications and returns commands, so any environment
//! adapter can drive it.

mod assignment;
mod ledger;
mod look;
mod params;
mod policy;
mod scan;
mod tracker;
mod types;

pub use assignment::{assign, assignment_cost, best_elevator, direction_penalty, Assignment};
pub use ledger::{FloorCounts, FloorLedger, RequestLedger};
pub use look::LookPolicy;
pub use params::{
    DispatchParams, DEFAULT_ALPHA, DEFAULT_BEHIND_PENALTY, DEFAULT_BETA, DEFAULT_GAMMA,
    DEFAULT_OPPOSITE_PENALTY,
};
pub use policy::{Command, DispatchPolicy, ElevatorEvent, Notification};
pub use scan::{candidate_floors, select_next_target};
pub use tracker::{ElevatorState, ElevatorTracker};
pub use types::{Direction, ElevatorId, ElevatorSnapshot, Floor, PassengerId, Request};
