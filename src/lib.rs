//! A discrete-time epidemic model for interacting populations
//!
//! `sird` models the spread of an infectious disease through one or more
//! population groups using a Susceptible-Infected-Recovered-Deceased (SIRD)
//! compartmental model, extended in two ways:
//! * Newly infected individuals enter quarantine and only become fully
//!   infectious once they are released. A configurable fraction of each
//!   quarantined cohort leaks and transmits anyway.
//! * Populations infect one another: every day, the susceptibles of each
//!   population are exposed to a share of every other population's active
//!   infected.
//!
//! Compartments hold real values, so fractional people are allowed. The model
//! is a deterministic recurrence evaluated one day at a time.
//!
//! The building blocks are:
//! * [`population::Population`], which owns one group's compartments and its
//!   [`quarantine::QuarantineSchedule`] and advances them by one day.
//! * [`coupler::cross_infect`], which applies cross-population exposure across
//!   all populations at once.
//! * [`simulation::Simulation`], a driver that owns the populations, runs the
//!   two daily phases in order, applies scheduled vaccinations and records the
//!   history of every day.
//!
//! ```rust
//! use sird::prelude::*;
//!
//! let mut simulation = Scenario::default().build().unwrap();
//! simulation.run(100).unwrap();
//! let totals = simulation.totals();
//! assert!(totals.deceased > 0.0);
//! ```
//!
//! Runs can also be configured from JSON scenario files and the command line
//! (see [`runner`]), and written out as CSV (see [`report`]).
pub mod coupler;
pub mod error;
pub mod log;
pub mod macros;
pub mod numeric;
pub mod plan;
pub mod population;
pub mod prelude;
pub mod quarantine;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod simulation;

pub use crate::log::{debug, error, info, trace, warn};
