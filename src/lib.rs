//! Elevator Dispatch Library
//!
//! A LOOK-based elevator dispatcher with cost-driven request assignment, and
//! a headless harness that runs it against a simulated building.

pub mod dispatch;
pub mod simulation;
