//! Module containing vehicle struct and related functions.

use crate::imports::*;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Propulsion/fuel type of a vehicle.  Fuel-dependent parameters are looked up in
/// [FUEL_PROPERTIES], so adding a fuel type means adding a variant and a table row.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Electric,
    #[default]
    Gasoline,
    Diesel,
}

/// Fuel-dependent vehicle parameters
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct FuelProperties {
    /// Calorific value, $\frac{kWh}{l}$, `None` for electric propulsion
    pub calorific_value_kwh_per_l: Option<f64>,
    /// Drivetrain efficiency at low driving resistance
    pub min_efficiency: f64,
    /// Drivetrain efficiency at high driving resistance
    pub max_efficiency: f64,
}

/// Fuel-dependent parameters, one row per [FuelType] in declaration order
pub const FUEL_PROPERTIES: [(FuelType, FuelProperties); 3] = [
    (
        FuelType::Electric,
        FuelProperties {
            calorific_value_kwh_per_l: None,
            min_efficiency: 0.9,
            max_efficiency: 0.9,
        },
    ),
    (
        FuelType::Gasoline,
        FuelProperties {
            calorific_value_kwh_per_l: Some(8.8),
            min_efficiency: 0.1,
            max_efficiency: 0.4,
        },
    ),
    (
        FuelType::Diesel,
        FuelProperties {
            calorific_value_kwh_per_l: Some(9.9),
            min_efficiency: 0.1,
            max_efficiency: 0.43,
        },
    ),
];

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::Electric, FuelType::Gasoline, FuelType::Diesel];

    pub fn properties(&self) -> FuelProperties {
        FUEL_PROPERTIES[*self as usize].1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electric => "electric",
            Self::Gasoline => "gasoline",
            Self::Diesel => "diesel",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|fuel_type| fuel_type.as_str() == s.trim().to_lowercase())
            .with_context(|| {
                format!(
                    "Unknown fuel type {s:?}, must be one of {:?}",
                    Self::ALL.map(|fuel_type| fuel_type.as_str())
                )
            })
    }
}

/// Struct containing vehicle attributes.  Created once per trip and only read afterwards.
///
/// Only mass, cross section, drag coefficient, fuel type and idle power are inputs; the
/// calorific value and efficiency bounds are derived from [FuelType::properties] by
/// [Vehicle::set_derived], which runs on construction and after deserialization.
///
/// # Example
/// ```
/// use eco_balance_core::vehicle::{FuelType, Vehicle};
///
/// let veh = Vehicle::new(1_500.0, 2.6, 0.3, FuelType::Diesel, 2.0).unwrap();
/// assert_eq!(veh.calorific_value_kwh_per_l, Some(9.9));
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Validate)]
#[serde(default)]
pub struct Vehicle {
    /// Vehicle name
    pub name: String,
    /// Vehicle mass, $kg$
    #[serde(alias = "mass")]
    #[validate(range(min = 0))]
    pub mass_kg: f64,
    /// Frontal cross section, $m^2$
    #[serde(alias = "A", alias = "cross_section")]
    #[validate(range(min = 0))]
    pub cross_section_m2: f64,
    /// Aerodynamic drag coefficient
    #[serde(alias = "cw")]
    #[validate(range(min = 0))]
    pub drag_coef: f64,
    /// Fuel type, one of \[electric, gasoline, diesel\]
    pub fuel_type: FuelType,
    /// Engine power while idling, $kW$, the floor of engine power for combustion engines
    #[serde(alias = "idle_power")]
    #[validate(range(min = 0))]
    pub idle_power_kw: f64,
    /// Fuel calorific value, $\frac{kWh}{l}$, derived from `fuel_type`
    #[serde(skip)]
    pub calorific_value_kwh_per_l: Option<f64>,
    /// Minimum drivetrain efficiency, derived from `fuel_type`
    #[serde(skip)]
    pub min_efficiency: f64,
    /// Maximum drivetrain efficiency, derived from `fuel_type`
    #[serde(skip)]
    pub max_efficiency: f64,
}

impl Default for Vehicle {
    /// Mid-size gasoline car
    fn default() -> Self {
        let properties = FuelType::Gasoline.properties();
        Self {
            name: String::from("Default gasoline car"),
            mass_kg: 1_500.0,
            cross_section_m2: 2.6,
            drag_coef: 0.3,
            fuel_type: FuelType::Gasoline,
            idle_power_kw: 2.0,
            calorific_value_kwh_per_l: properties.calorific_value_kwh_per_l,
            min_efficiency: properties.min_efficiency,
            max_efficiency: properties.max_efficiency,
        }
    }
}

impl Vehicle {
    /// Creates and validates a vehicle
    ///
    /// # Arguments
    /// - `mass_kg`: vehicle mass, $kg$
    /// - `cross_section_m2`: frontal cross section, $m^2$
    /// - `drag_coef`: aerodynamic drag coefficient
    /// - `fuel_type`: propulsion/fuel type
    /// - `idle_power_kw`: engine power while idling, $kW$
    pub fn new(
        mass_kg: f64,
        cross_section_m2: f64,
        drag_coef: f64,
        fuel_type: FuelType,
        idle_power_kw: f64,
    ) -> anyhow::Result<Self> {
        let mut veh = Self {
            name: String::default(),
            mass_kg,
            cross_section_m2,
            drag_coef,
            fuel_type,
            idle_power_kw,
            calorific_value_kwh_per_l: None,
            min_efficiency: 0.0,
            max_efficiency: 0.0,
        };
        veh.set_derived()?;
        Ok(veh)
    }

    /// Validates inputs and sets derived parameters:
    /// - `calorific_value_kwh_per_l`
    /// - `min_efficiency`
    /// - `max_efficiency`
    pub fn set_derived(&mut self) -> anyhow::Result<()> {
        match self.validate() {
            Ok(_) => (),
            Err(e) => bail!(e),
        };
        ensure!(self.mass_kg > 0.0, format_dbg!(self.mass_kg > 0.0));
        ensure!(
            self.cross_section_m2 > 0.0,
            format_dbg!(self.cross_section_m2 > 0.0)
        );

        let properties = self.fuel_type.properties();
        self.calorific_value_kwh_per_l = properties.calorific_value_kwh_per_l;
        self.min_efficiency = properties.min_efficiency;
        self.max_efficiency = properties.max_efficiency;

        ensure!(
            0.0 < self.min_efficiency
                && self.min_efficiency <= self.max_efficiency
                && self.max_efficiency <= 1.0,
            "efficiency bounds of {} must satisfy 0 < min <= max <= 1, got min = {}, max = {}",
            self.fuel_type,
            self.min_efficiency,
            self.max_efficiency
        );
        if let Some(calorific_value) = self.calorific_value_kwh_per_l {
            ensure!(calorific_value > 0.0, format_dbg!(calorific_value > 0.0));
        }
        Ok(())
    }

    /// Electric vehicles recover energy while braking, so their power is not floored at idle
    pub fn is_electric(&self) -> bool {
        self.fuel_type == FuelType::Electric
    }
}

impl SerdeAPI for Vehicle {
    fn init(&mut self) -> anyhow::Result<()> {
        self.set_derived()
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vehicle properties:")?;
        writeln!(f, " fuel_type: {}", self.fuel_type)?;
        writeln!(f, " mass_kg: {}", self.mass_kg)?;
        writeln!(f, " cross_section_m2: {}", self.cross_section_m2)?;
        writeln!(f, " drag_coef: {}", self.drag_coef)?;
        writeln!(f, " calorific_value_kwh_per_l: {:?}", self.calorific_value_kwh_per_l)?;
        writeln!(f, " idle_power_kw: {}", self.idle_power_kw)?;
        writeln!(f, " min_efficiency: {}", self.min_efficiency)?;
        write!(f, " max_efficiency: {}", self.max_efficiency)
    }
}
