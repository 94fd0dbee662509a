#![allow(clippy::field_reassign_with_default)]

//! Crate containing models for estimating instantaneous and trip-aggregated fuel and
//! energy consumption of road vehicles from GPS trajectories.
//!
//! The consumption core consists of:
//! - [resistance]: decomposition of driving resistance into aerodynamic, rolling,
//!   climbing and inertial terms
//! - [efficiency]: drivetrain efficiency interpolation over driving resistance
//! - [consumption]: the physical (load-based) and statistical (regression) models
//! - [aggregate]: integration of instantaneous consumption into trip totals
//!
//! [geo], [kinematics], [road] and [elevation] turn raw GPS points into the
//! sample series consumed by the core; see [samples].

#[macro_use]
pub mod macros;

pub mod aggregate;
pub mod consumption;
pub mod efficiency;
pub mod elevation;
pub mod geo;
pub mod imports;
pub mod kinematics;
pub mod params;
pub mod prelude;
pub mod resistance;
pub mod road;
pub mod samples;
pub mod traits;
pub mod utils;
pub mod vehicle;
