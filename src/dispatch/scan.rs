//! LOOK target selection
//!
//! An elevator keeps going in its current direction while requested floors
//! remain ahead of it, then turns around to the nearest floor behind it.

use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

use super::ledger::FloorLedger;
use super::types::{Direction, Floor};

/// Next floor to visit, or `None` when there is nothing to do
pub fn select_next_target(
    floor: Floor,
    direction: Direction,
    requested: &BTreeSet<Floor>,
) -> Option<Floor> {
    if requested.is_empty() {
        return None;
    }

    let nearest_above = requested.range((Excluded(floor), Unbounded)).next().copied();
    let nearest_below = requested.range(..floor).next_back().copied();
    let here = requested.contains(&floor).then_some(floor);

    match direction {
        Direction::Up => nearest_above.or(nearest_below).or(here),
        Direction::Down => nearest_below.or(nearest_above).or(here),
        Direction::Stopped => requested
            .iter()
            .copied()
            .min_by_key(|candidate| (candidate.abs_diff(floor), *candidate)),
    }
}

/// Floors an elevator may currently be sent to
///
/// A full car can only drop passengers off, so its pending calls are held
/// back (not forgotten) until a destination has been served.
pub fn candidate_floors(ledger: &FloorLedger, is_full: bool) -> BTreeSet<Floor> {
    if is_full {
        ledger.destinations.floors().collect()
    } else {
        ledger.requested_floors()
    }
}
