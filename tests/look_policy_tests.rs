//! LOOK dispatch policy behaviour tests
//!
//! These drive the policy purely through notifications, the way an
//! environment adapter would.

use elevator_dispatch::dispatch::{
    Command, Direction, DispatchParams, DispatchPolicy, ElevatorEvent, ElevatorId,
    ElevatorSnapshot, LookPolicy, Notification, PassengerId, Request,
};

const E0: ElevatorId = ElevatorId(0);
const E1: ElevatorId = ElevatorId(1);

fn policy_with(elevators: &[ElevatorSnapshot]) -> LookPolicy {
    let mut policy = LookPolicy::new(DispatchParams::default());
    let commands = policy.on_init(elevators);
    assert!(commands.is_empty());
    policy
}

fn request(passenger: usize, origin: u32, direction: Direction) -> Request {
    Request::new(PassengerId(passenger), origin, direction)
}

fn arrive_and_board(
    policy: &mut LookPolicy,
    elevator: ElevatorId,
    passenger: usize,
    floor: u32,
    destination: u32,
) {
    policy
        .on_elevator_event(ElevatorEvent::Stopped { elevator, floor })
        .unwrap();
    policy
        .on_elevator_event(ElevatorEvent::PassengerBoarded {
            elevator,
            passenger: PassengerId(passenger),
            origin: floor,
            destination,
        })
        .unwrap();
}

/// A single call sends the idle elevator up to it
#[test]
fn test_single_call_dispatches_idle_elevator() {
    let mut policy = policy_with(&[ElevatorSnapshot::idle_at(E0, 0)]);
    policy.on_request(request(0, 5, Direction::Up));

    let commands = policy.on_tick_end(&[ElevatorSnapshot::idle_at(E0, 0)]);

    assert_eq!(commands, vec![Command::move_to(E0, 5)]);
    let state = policy.tracker().get(E0).unwrap();
    assert_eq!(state.target, Some(5));
    assert_eq!(state.direction, Direction::Up);
    assert_eq!(policy.assigned_elevator(PassengerId(0)), Some(E0));
    assert!(policy.pending_requests().is_empty());
    assert_eq!(*policy.params(), DispatchParams::default());
}

/// After a pickup the car keeps heading up to the next call
#[test]
fn test_keeps_direction_after_pickup() {
    let mut policy = policy_with(&[ElevatorSnapshot::idle_at(E0, 0)]);
    policy.on_request(request(0, 5, Direction::Up));
    policy.on_request(request(1, 7, Direction::Up));
    assert_eq!(
        policy.on_tick_end(&[ElevatorSnapshot::idle_at(E0, 0)]),
        vec![Command::move_to(E0, 5)]
    );

    arrive_and_board(&mut policy, E0, 0, 5, 9);
    let commands = policy.on_tick_end(&[ElevatorSnapshot::new(E0, 5.0, 1, false)]);

    assert_eq!(commands, vec![Command::move_to(E0, 7)]);
    assert_eq!(policy.tracker().get(E0).unwrap().direction, Direction::Up);
}

/// Nothing above: the car turns around for a destination below
#[test]
fn test_reverses_for_destination_below() {
    let mut policy = policy_with(&[ElevatorSnapshot::idle_at(E0, 0)]);
    policy.on_request(request(0, 7, Direction::Down));
    policy.on_tick_end(&[ElevatorSnapshot::idle_at(E0, 0)]);

    arrive_and_board(&mut policy, E0, 0, 7, 2);
    let commands = policy.on_tick_end(&[ElevatorSnapshot::new(E0, 7.0, 1, false)]);

    assert_eq!(commands, vec![Command::move_to(E0, 2)]);
    assert_eq!(policy.tracker().get(E0).unwrap().direction, Direction::Down);
    assert!(policy.ledger().calls(E0).is_empty());
}

/// Two calls at the same floor count twice and survive one removal
#[test]
fn test_same_floor_calls_on_single_elevator() {
    let mut policy = LookPolicy::new(DispatchParams::distance_only());
    policy.on_init(&[ElevatorSnapshot::idle_at(E0, 0)]);
    policy.on_request(request(0, 4, Direction::Up));
    policy.on_request(request(1, 4, Direction::Down));

    let commands = policy.on_tick_end(&[ElevatorSnapshot::idle_at(E0, 0)]);

    assert_eq!(commands, vec![Command::move_to(E0, 4)]);
    assert_eq!(policy.ledger().get(E0).unwrap().calls.count(4), 2);
    assert_eq!(
        policy.waiting_passengers(E0),
        vec![PassengerId(0), PassengerId(1)]
    );

    arrive_and_board(&mut policy, E0, 0, 4, 8);
    assert!(policy.ledger().calls(E0).contains(&4));
}

/// A full car heads for its destination and picks the call up afterwards
#[test]
fn test_full_elevator_defers_calls() {
    let mut policy = policy_with(&[ElevatorSnapshot::idle_at(E0, 0)]);
    policy.on_request(request(0, 1, Direction::Up));
    assert_eq!(
        policy.on_tick_end(&[ElevatorSnapshot::idle_at(E0, 0)]),
        vec![Command::move_to(E0, 1)]
    );

    arrive_and_board(&mut policy, E0, 0, 1, 6);
    policy.on_request(request(1, 3, Direction::Up));
    let commands = policy.on_tick_end(&[ElevatorSnapshot::new(E0, 1.0, 1, true)]);

    assert_eq!(commands, vec![Command::move_to(E0, 6)]);
    assert!(policy.ledger().calls(E0).contains(&3));

    policy
        .on_elevator_event(ElevatorEvent::Stopped { elevator: E0, floor: 6 })
        .unwrap();
    policy
        .on_elevator_event(ElevatorEvent::PassengerAlighted {
            elevator: E0,
            passenger: PassengerId(0),
            destination: 6,
        })
        .unwrap();
    let commands = policy.on_tick_end(&[ElevatorSnapshot::idle_at(E0, 6)]);

    assert_eq!(commands, vec![Command::move_to(E0, 3)]);
}

#[test]
fn test_not_full_elevator_stops_for_calls() {
    let mut policy = policy_with(&[ElevatorSnapshot::idle_at(E0, 0)]);
    policy.on_request(request(0, 1, Direction::Up));
    policy.on_tick_end(&[ElevatorSnapshot::idle_at(E0, 0)]);

    arrive_and_board(&mut policy, E0, 0, 1, 6);
    policy.on_request(request(1, 3, Direction::Up));
    let commands = policy.on_tick_end(&[ElevatorSnapshot::new(E0, 1.0, 1, false)]);

    assert_eq!(commands, vec![Command::move_to(E0, 3)]);
}

/// Targets are not recomputed while the car is travelling
#[test]
fn test_no_replanning_mid_flight() {
    let mut policy = policy_with(&[ElevatorSnapshot::idle_at(E0, 0)]);
    policy.on_request(request(0, 5, Direction::Up));
    policy.on_tick_end(&[ElevatorSnapshot::idle_at(E0, 0)]);

    policy.on_request(request(1, 3, Direction::Up));
    let commands = policy.on_tick_end(&[ElevatorSnapshot::new(E0, 2.5, 0, false)]);

    assert!(commands.is_empty());
    assert_eq!(policy.tracker().get(E0).unwrap().target, Some(5));
    assert_eq!(policy.assigned_elevator(PassengerId(1)), Some(E0));
}

/// An idle report re-issues the pending target
#[test]
fn test_idle_event_recovers_lost_command() {
    let mut policy = policy_with(&[ElevatorSnapshot::idle_at(E0, 0)]);
    policy.on_request(request(0, 4, Direction::Up));
    policy.on_tick_end(&[ElevatorSnapshot::idle_at(E0, 0)]);

    let commands = policy
        .on_elevator_event(ElevatorEvent::Idle { elevator: E0 })
        .unwrap();
    assert_eq!(commands, vec![Command::move_to(E0, 4)]);

    // With nothing to do an idle car stays put
    let mut empty = policy_with(&[ElevatorSnapshot::idle_at(E1, 2)]);
    let commands = empty
        .on_elevator_event(ElevatorEvent::Idle { elevator: E1 })
        .unwrap();
    assert!(commands.is_empty());
    assert_eq!(empty.tracker().get(E1).unwrap().direction, Direction::Stopped);
}

/// Each passenger is assigned to exactly one elevator
#[test]
fn test_assignment_is_exclusive() {
    let fleet = [
        ElevatorSnapshot::idle_at(E0, 0),
        ElevatorSnapshot::idle_at(E1, 9),
    ];
    let mut policy = policy_with(&fleet);
    for (passenger, origin) in [2, 8, 5, 0, 9, 4].into_iter().enumerate() {
        policy.on_request(request(passenger, origin, Direction::Up));
    }
    policy.on_tick_end(&fleet);

    let mut waiting = policy.waiting_passengers(E0);
    waiting.extend(policy.waiting_passengers(E1));
    waiting.sort();
    assert_eq!(waiting, (0..6).map(PassengerId).collect::<Vec<_>>());

    let total_calls = policy.ledger().pending_count(E0) + policy.ledger().pending_count(E1);
    assert_eq!(total_calls, 6);
}

/// Boarding another car releases the call on the assigned one
#[test]
fn test_boarding_different_elevator_clears_owner_call() {
    let fleet = [
        ElevatorSnapshot::idle_at(E0, 0),
        ElevatorSnapshot::idle_at(E1, 9),
    ];
    let mut policy = policy_with(&fleet);
    policy.on_request(request(0, 1, Direction::Up));
    policy.on_tick_end(&fleet);
    assert_eq!(policy.assigned_elevator(PassengerId(0)), Some(E0));

    policy
        .on_elevator_event(ElevatorEvent::PassengerBoarded {
            elevator: E1,
            passenger: PassengerId(0),
            origin: 1,
            destination: 5,
        })
        .unwrap();

    assert!(policy.ledger().is_empty(E0));
    assert!(policy.ledger().destinations(E1).contains(&5));
    assert_eq!(policy.assigned_elevator(PassengerId(0)), None);
}

/// Boarding before assignment never leaves a stale call behind
#[test]
fn test_boarding_before_assignment() {
    let mut policy = policy_with(&[ElevatorSnapshot::idle_at(E0, 3)]);
    policy.on_request(request(0, 3, Direction::Up));
    policy
        .on_elevator_event(ElevatorEvent::PassengerBoarded {
            elevator: E0,
            passenger: PassengerId(0),
            origin: 3,
            destination: 7,
        })
        .unwrap();

    assert!(policy.pending_requests().is_empty());
    let commands = policy.on_tick_end(&[ElevatorSnapshot::new(E0, 3.0, 1, false)]);

    assert_eq!(commands, vec![Command::move_to(E0, 7)]);
    assert!(policy.ledger().calls(E0).is_empty());
}

#[test]
fn test_double_alight_is_harmless() {
    let mut policy = policy_with(&[ElevatorSnapshot::idle_at(E0, 0)]);
    let alight = ElevatorEvent::PassengerAlighted {
        elevator: E0,
        passenger: PassengerId(0),
        destination: 4,
    };

    assert!(policy.on_elevator_event(alight).unwrap().is_empty());
    assert!(policy.on_elevator_event(alight).unwrap().is_empty());
    assert!(policy.ledger().is_empty(E0));
}

#[test]
fn test_unknown_elevator_is_rejected() {
    let mut policy = policy_with(&[ElevatorSnapshot::idle_at(E0, 0)]);

    let result = policy.on_elevator_event(ElevatorEvent::Stopped {
        elevator: ElevatorId(42),
        floor: 1,
    });
    assert!(result.is_err());
    assert!(policy.next_target(ElevatorId(42)).is_err());
}

/// Requests announced before any elevator exists wait for one
#[test]
fn test_requests_wait_for_elevators() {
    let mut policy = LookPolicy::new(DispatchParams::default());
    policy.on_request(request(0, 3, Direction::Down));

    assert!(policy.on_tick_end(&[]).is_empty());
    assert_eq!(policy.pending_requests().len(), 1);

    let commands = policy.on_tick_end(&[ElevatorSnapshot::idle_at(E0, 0)]);
    assert_eq!(commands, vec![Command::move_to(E0, 3)]);
}

/// The generic entry point routes notifications
#[test]
fn test_notify_routes_notifications() {
    let mut policy = policy_with(&[ElevatorSnapshot::idle_at(E0, 0)]);

    let commands = policy
        .notify(Notification::RequestArrived(request(0, 2, Direction::Up)))
        .unwrap();
    assert!(commands.is_empty());
    assert_eq!(policy.pending_requests().len(), 1);

    let commands = policy
        .notify(Notification::Elevator(ElevatorEvent::Idle { elevator: E0 }))
        .unwrap();
    assert!(commands.is_empty());
}
