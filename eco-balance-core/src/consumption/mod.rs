//! Instantaneous consumption models.
//!
//! Two interchangeable models turn kinematic samples into a consumption series:
//! - [PhysicalModel]: load-based, driving resistance -> engine power -> consumption
//! - [StatisticalModel]: closed-form regression on speed, acceleration and gradient
//!
//! [ConsumptionModel] wraps either so callers can select a model at runtime.

use crate::imports::*;
use crate::samples::SampleSeries;
use crate::vehicle::Vehicle;
use std::fmt;
use std::str::FromStr;

pub mod physical;
pub mod statistical;

pub use physical::PhysicalModel;
pub use statistical::StatisticalModel;

/// Unit regime of a consumption series
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConsumptionType {
    /// fuel consumption, instantaneous in $\frac{l}{h}$, aggregated in $l$
    #[default]
    Fuel,
    /// energy consumption, instantaneous in $kW$, aggregated in $kWh$
    Energy,
}

impl ConsumptionType {
    pub const ALL: [ConsumptionType; 2] = [ConsumptionType::Fuel, ConsumptionType::Energy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fuel => "fuel",
            Self::Energy => "energy",
        }
    }

    /// Unit of instantaneous consumption
    pub fn rate_unit(&self) -> &'static str {
        match self {
            Self::Fuel => "l/h",
            Self::Energy => "kW",
        }
    }

    /// Unit of aggregated consumption
    pub fn total_unit(&self) -> &'static str {
        match self {
            Self::Fuel => "l",
            Self::Energy => "kWh",
        }
    }

    /// Unit of distance-normalized consumption
    pub fn per_100km_unit(&self) -> &'static str {
        match self {
            Self::Fuel => "l/100km",
            Self::Energy => "kWh/100km",
        }
    }
}

impl fmt::Display for ConsumptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsumptionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|consumption_type| consumption_type.as_str() == s.trim().to_lowercase())
            .with_context(|| {
                format!(
                    "Unknown consumption type {s:?}, must be one of {:?}",
                    Self::ALL.map(|consumption_type| consumption_type.as_str())
                )
            })
    }
}

/// Selects one of the consumption models
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConsumptionModel {
    Physical(PhysicalModel),
    Statistical(StatisticalModel),
}

impl Default for ConsumptionModel {
    fn default() -> Self {
        Self::Physical(PhysicalModel::default())
    }
}

impl ConsumptionModel {
    /// Returns instantaneous consumption for each sample, unit per [Self::consumption_type]
    ///
    /// # Arguments
    /// - `samples`: kinematic sample series of a trip
    /// - `veh`: vehicle, ignored by the statistical model
    /// - `rolling_coef`: rolling resistance coefficient, ignored by the statistical model
    pub fn calculate(
        &mut self,
        samples: &SampleSeries,
        veh: &Vehicle,
        rolling_coef: &ScalarOrArray,
    ) -> anyhow::Result<Array1<f64>> {
        match self {
            Self::Physical(model) => model.calculate_consumption(
                &samples.speed_kmph,
                &samples.accel_mps2,
                &samples.grade_rad,
                veh,
                rolling_coef,
                None,
            ),
            Self::Statistical(model) => model.calculate_consumption(
                &samples.speed_kmph,
                &samples.accel_mps2,
                &samples.grade_rad,
            ),
        }
    }

    pub fn consumption_type(&self) -> ConsumptionType {
        match self {
            Self::Physical(model) => model.consumption_type,
            Self::Statistical(_) => ConsumptionType::Fuel,
        }
    }

    /// Most recently calculated consumption series, empty before the first calculation
    pub fn consumption(&self) -> &Array1<f64> {
        match self {
            Self::Physical(model) => &model.consumption,
            Self::Statistical(model) => &model.consumption,
        }
    }
}

impl SerdeAPI for ConsumptionModel {
    fn init(&mut self) -> anyhow::Result<()> {
        match self {
            Self::Physical(model) => model.init(),
            Self::Statistical(model) => model.init(),
        }
    }
}
