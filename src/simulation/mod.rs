//! Headless building harness
//!
//! A minimal discrete-tick environment for driving a dispatch policy from
//! the console and from tests: constant-speed cars, instant boarding, random
//! passengers. It exchanges nothing with the policy beyond notifications and
//! commands.

mod config;
mod elevator;
mod passenger;
mod stats;
mod world;

pub use config::{
    BuildingConfig, DEFAULT_CAPACITY, DEFAULT_ELEVATORS, DEFAULT_FLOORS, DEFAULT_SPAWN_RATE,
    DEFAULT_SPEED,
};
pub use elevator::{ElevatorUpdateResult, SimElevator};
pub use passenger::SimPassenger;
pub use stats::SimulationStats;
pub use world::SimWorld;
