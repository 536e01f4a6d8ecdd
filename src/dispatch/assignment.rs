//! Request-to-elevator assignment
//!
//! Greedy and per-request: each buffered request is scored against every
//! elevator on its own and committed to the cheapest one. Commitments are
//! never revisited.

use log::{debug, warn};
use ordered_float::OrderedFloat;

use super::ledger::RequestLedger;
use super::params::DispatchParams;
use super::tracker::{ElevatorState, ElevatorTracker};
use super::types::{Direction, ElevatorId, PassengerId, Request};

/// A committed assignment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment {
    pub passenger: PassengerId,
    pub elevator: ElevatorId,
    pub cost: f64,
}

/// Direction penalty before weighting by γ
pub fn direction_penalty(state: &ElevatorState, request: &Request, params: &DispatchParams) -> f64 {
    let floor = state.floor();
    match state.direction {
        Direction::Stopped => 0.0,
        direction if direction == request.direction => {
            if direction.is_ahead_or_at(floor, request.origin) {
                0.0
            } else {
                params.behind_penalty
            }
        }
        _ => params.opposite_penalty,
    }
}

/// Cost of serving `request` with the elevator in `state`
pub fn assignment_cost(state: &ElevatorState, request: &Request, params: &DispatchParams) -> f64 {
    let distance = state.floor().abs_diff(request.origin) as f64;
    let load = state.snapshot.passenger_count as f64;

    params.alpha * distance
        + params.beta * load
        + params.gamma * direction_penalty(state, request, params)
}

/// Pick the cheapest elevator for `request`
///
/// Ties go to the first elevator in tracker order.
pub fn best_elevator(
    tracker: &ElevatorTracker,
    request: &Request,
    params: &DispatchParams,
) -> Option<(ElevatorId, f64)> {
    tracker
        .states()
        .map(|state| (state.id(), OrderedFloat(assignment_cost(state, request, params))))
        .min_by_key(|(_, cost)| *cost)
        .map(|(id, cost)| (id, cost.into_inner()))
}

/// Drain `pending` into the ledger
///
/// With no elevators tracked nothing is drained, so the requests are retried
/// on the next cycle.
pub fn assign(
    pending: &mut Vec<Request>,
    tracker: &ElevatorTracker,
    ledger: &mut RequestLedger,
    params: &DispatchParams,
) -> Vec<Assignment> {
    if pending.is_empty() {
        return Vec::new();
    }

    if tracker.is_empty() {
        warn!(
            "No elevators available, keeping {} request(s) for the next cycle",
            pending.len()
        );
        return Vec::new();
    }

    let mut assignments = Vec::with_capacity(pending.len());

    for request in pending.drain(..) {
        let Some((elevator, cost)) = best_elevator(tracker, &request, params) else {
            continue;
        };

        ledger.add_call(elevator, request.origin);
        debug!(
            "{} at floor {} ({}) assigned to {} (cost {:.2})",
            request.passenger, request.origin, request.direction, elevator, cost
        );

        assignments.push(Assignment {
            passenger: request.passenger,
            elevator,
            cost,
        });
    }

    assignments
}
