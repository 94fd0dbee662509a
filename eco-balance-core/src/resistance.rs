//! Driving resistance decomposition.
//!
//! Total driving resistance is the sum of aerodynamic drag, rolling resistance, climbing
//! resistance and inertial resistance.  All speeds are in $\frac{m}{s}$ here; callers
//! convert from $\frac{km}{h}$ before calling into this module.
//!
//! Reference: Pischinger and Seiffert, "Vieweg Handbuch Kraftfahrzeugtechnik",
//! Springer (2016), p. 62

use crate::imports::*;
use crate::params::PhysicalProperties;
use crate::vehicle::Vehicle;
use itertools::izip;

/// Aerodynamic drag, $N$, always opposing motion
pub fn aerodynamic_drag(
    speed_mps: f64,
    cross_section_m2: f64,
    drag_coef: f64,
    air_density_kg_per_m3: f64,
) -> f64 {
    0.5 * drag_coef * cross_section_m2 * air_density_kg_per_m3 * speed_mps.powi(2)
}

/// Rolling resistance, $N$
pub fn rolling_resistance(grade_rad: f64, mass_kg: f64, rolling_coef: f64, a_grav_mps2: f64) -> f64 {
    mass_kg * a_grav_mps2 * rolling_coef * grade_rad.cos()
}

/// Climbing resistance, $N$, positive uphill and negative downhill
pub fn climbing_resistance(grade_rad: f64, mass_kg: f64, a_grav_mps2: f64) -> f64 {
    mass_kg * a_grav_mps2 * grade_rad.sin()
}

/// Inertial resistance, $N$, negative while decelerating
pub fn inertial_resistance(accel_mps2: f64, mass_kg: f64) -> f64 {
    mass_kg * accel_mps2
}

/// Total driving resistance, $N$, of a single sample
#[allow(clippy::too_many_arguments)]
pub fn driving_resistance(
    speed_mps: f64,
    accel_mps2: f64,
    grade_rad: f64,
    mass_kg: f64,
    cross_section_m2: f64,
    drag_coef: f64,
    rolling_coef: f64,
    air_density_kg_per_m3: f64,
    a_grav_mps2: f64,
) -> f64 {
    aerodynamic_drag(speed_mps, cross_section_m2, drag_coef, air_density_kg_per_m3)
        + rolling_resistance(grade_rad, mass_kg, rolling_coef, a_grav_mps2)
        + climbing_resistance(grade_rad, mass_kg, a_grav_mps2)
        + inertial_resistance(accel_mps2, mass_kg)
}

/// Per-sample driving resistance terms, $N$
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DrivingResistance {
    pub aerodynamic: Array1<f64>,
    pub rolling: Array1<f64>,
    pub climbing: Array1<f64>,
    pub inertial: Array1<f64>,
}

impl DrivingResistance {
    /// Decomposes driving resistance over a sample series
    ///
    /// # Arguments
    /// - `speed_mps`: vehicle speed, $\frac{m}{s}$
    /// - `accel_mps2`: vehicle acceleration, $\frac{m}{s^2}$
    /// - `grade_rad`: road gradient angle, $rad$
    /// - `rolling_coef`: rolling resistance coefficient per sample
    /// - `veh`: vehicle providing mass, cross section and drag coefficient
    /// - `props`: gravitational acceleration and air density
    pub fn new(
        speed_mps: &Array1<f64>,
        accel_mps2: &Array1<f64>,
        grade_rad: &Array1<f64>,
        rolling_coef: &Array1<f64>,
        veh: &Vehicle,
        props: &PhysicalProperties,
    ) -> anyhow::Result<Self> {
        ensure_equal_len(&[
            ("speed", speed_mps.len()),
            ("acceleration", accel_mps2.len()),
            ("gradient_angle", grade_rad.len()),
            ("rolling_coef", rolling_coef.len()),
        ])?;
        let len = speed_mps.len();
        let mut res = Self {
            aerodynamic: Array1::zeros(len),
            rolling: Array1::zeros(len),
            climbing: Array1::zeros(len),
            inertial: Array1::zeros(len),
        };
        for (i, (speed, accel, grade, cr)) in
            izip!(speed_mps, accel_mps2, grade_rad, rolling_coef).enumerate()
        {
            res.aerodynamic[i] = aerodynamic_drag(
                *speed,
                veh.cross_section_m2,
                veh.drag_coef,
                props.air_density_kg_per_m3,
            );
            res.rolling[i] = rolling_resistance(*grade, veh.mass_kg, *cr, props.a_grav_mps2);
            res.climbing[i] = climbing_resistance(*grade, veh.mass_kg, props.a_grav_mps2);
            res.inertial[i] = inertial_resistance(*accel, veh.mass_kg);
        }
        Ok(res)
    }

    pub fn len(&self) -> usize {
        self.aerodynamic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total driving resistance, $N$
    pub fn total(&self) -> Array1<f64> {
        &self.aerodynamic + &self.rolling + &self.climbing + &self.inertial
    }
}
