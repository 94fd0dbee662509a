//! Convenience re-exports of the types most callers need.

pub use crate::aggregate::{accumulate_consumption, consumption_per_100km, TripSummary};
pub use crate::consumption::{
    ConsumptionModel, ConsumptionType, PhysicalModel, StatisticalModel,
};
pub use crate::geo::{DistanceMethod, Ellipsoid};
pub use crate::params::PhysicalProperties;
pub use crate::samples::{GpsPoint, SampleSeries, Trajectory};
pub use crate::traits::{ApproxEq, SerdeAPI};
pub use crate::utils::ScalarOrArray;
pub use crate::vehicle::{FuelType, Vehicle};
