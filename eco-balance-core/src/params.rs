//! Module containing unit conversions, model constants and physical properties.

use crate::imports::*;

/// Unit conversions that should NEVER change
pub const KMPH_PER_MPS: f64 = 3.6;
pub const SECS_PER_HOUR: f64 = 3_600.0;
pub const M_PER_KM: f64 = 1_000.0;
pub const W_PER_KW: f64 = 1_000.0;

/// Driving resistance, $N$, at (or below) which a vehicle runs at its minimum efficiency
pub const EFF_RES_MIN_N: f64 = -2_000.0;
/// Driving resistance, $N$, at (or above) which a vehicle runs at its maximum efficiency
pub const EFF_RES_MAX_N: f64 = 2_000.0;

/// Rolling resistance coefficient of asphalt, used whenever no coefficient is known.
/// Source: Martin Treiber and Arne Kesting, "Traffic Flow Dynamics", Springer (2013), p. 395
pub const DEFAULT_ROLLING_COEF: f64 = 0.02;

/// Fuel consumption, $\frac{l}{h}$, below which the statistical model never reports
pub const DEFAULT_IDLE_CONSUMPTION_L_PER_H: f64 = 1.5;

/// Physical constants used by the load-based consumption model
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PhysicalProperties {
    /// Gravitational acceleration, $\frac{m}{s^2}$
    /// Source: Treiber and Kesting, "Traffic Flow Dynamics", p. 395
    pub a_grav_mps2: f64, // = 9.81
    /// Air density, $\frac{kg}{m^3}$
    /// Source: Pischinger and Seiffert, "Vieweg Handbuch Kraftfahrzeugtechnik", p. 63
    pub air_density_kg_per_m3: f64, // = 1.225
}

impl Default for PhysicalProperties {
    fn default() -> Self {
        Self {
            a_grav_mps2: 9.81,
            air_density_kg_per_m3: 1.225,
        }
    }
}

impl PhysicalProperties {
    pub fn new(a_grav_mps2: f64, air_density_kg_per_m3: f64) -> anyhow::Result<Self> {
        let mut props = Self {
            a_grav_mps2,
            air_density_kg_per_m3,
        };
        props.init()?;
        Ok(props)
    }
}

impl SerdeAPI for PhysicalProperties {
    fn init(&mut self) -> anyhow::Result<()> {
        ensure!(
            self.a_grav_mps2 > 0.0,
            format_dbg!(self.a_grav_mps2 > 0.0)
        );
        ensure!(
            self.air_density_kg_per_m3 >= 0.0,
            format_dbg!(self.air_density_kg_per_m3 >= 0.0)
        );
        Ok(())
    }
}

#[cfg(test)]
mod params_test {
    use super::*;

    #[test]
    fn test_default_props() {
        let props = PhysicalProperties::default();
        assert_eq!(props.a_grav_mps2, 9.81);
        assert_eq!(props.air_density_kg_per_m3, 1.225);
    }

    #[test]
    fn test_props_from_yaml() {
        let props =
            PhysicalProperties::from_yaml("a_grav_mps2: 9.80665\nair_density_kg_per_m3: 1.2\n")
                .unwrap();
        assert_eq!(props.a_grav_mps2, 9.80665);
        assert_eq!(props.air_density_kg_per_m3, 1.2);
    }

    #[test]
    fn test_props_reject_nonpositive_gravity() {
        assert!(PhysicalProperties::new(0.0, 1.2).is_err());
        assert!(PhysicalProperties::from_json(
            r#"{"a_grav_mps2": -9.81, "air_density_kg_per_m3": 1.2}"#
        )
        .is_err());
    }
}
