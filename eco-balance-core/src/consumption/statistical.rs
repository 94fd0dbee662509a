//! Statistical fuel consumption model.
//!
//! Closed-form regression on speed, acceleration and gradient that needs no vehicle
//! parameters:
//! $$c = a + b v^3 + c_{cos} v \cos\theta + d v \sin\theta + e v a_{veh}$$
//! with speed $v$ in $\frac{m}{s}$, floored at idle consumption.

use crate::imports::*;
use crate::params::{DEFAULT_IDLE_CONSUMPTION_L_PER_H, KMPH_PER_MPS};
use itertools::izip;

/// Statistical fuel consumption model, output in $\frac{l}{h}$
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct StatisticalModel {
    /// constant term, $\frac{l}{h}$
    pub a: f64,
    /// cubic speed term
    pub b: f64,
    /// speed times cosine of gradient
    pub c: f64,
    /// speed times sine of gradient
    pub d: f64,
    /// speed times acceleration
    pub e: f64,
    /// Consumption floor, $\frac{l}{h}$
    pub idle_consumption: f64,
    /// Instantaneous consumption of the last calculation, $\frac{l}{h}$
    #[serde(skip)]
    pub consumption: Array1<f64>,
}

/// Coefficient set with a = 1.41, which the idle floor overrides at standstill
impl Default for StatisticalModel {
    fn default() -> Self {
        Self {
            a: 1.41,
            b: 0.000134,
            c: 0.0670,
            d: 1.90,
            e: 0.197,
            idle_consumption: DEFAULT_IDLE_CONSUMPTION_L_PER_H,
            consumption: Array1::zeros(0),
        }
    }
}

impl StatisticalModel {
    /// Coefficient set with a = 1.57, above the idle floor, other terms as in `Default`
    pub fn raised_constant() -> Self {
        Self {
            a: 1.57,
            ..Self::default()
        }
    }

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, idle_consumption: f64) -> anyhow::Result<Self> {
        let mut model = Self {
            a,
            b,
            c,
            d,
            e,
            idle_consumption,
            consumption: Array1::zeros(0),
        };
        model.init()?;
        Ok(model)
    }

    /// Returns instantaneous fuel consumption, $\frac{l}{h}$
    ///
    /// # Arguments
    /// - `speed_kmph`: vehicle speed, $\frac{km}{h}$
    /// - `accel_mps2`: vehicle acceleration, $\frac{m}{s^2}$
    /// - `grade_rad`: road gradient angle, $rad$
    pub fn calculate_consumption(
        &mut self,
        speed_kmph: &Array1<f64>,
        accel_mps2: &Array1<f64>,
        grade_rad: &Array1<f64>,
    ) -> anyhow::Result<Array1<f64>> {
        ensure_equal_len(&[
            ("speed", speed_kmph.len()),
            ("acceleration", accel_mps2.len()),
            ("gradient_angle", grade_rad.len()),
        ])?;
        let consumption: Array1<f64> = izip!(speed_kmph, accel_mps2, grade_rad)
            .map(|(speed_kmph, accel, grade)| {
                let v = speed_kmph / KMPH_PER_MPS;
                let raw = self.a
                    + self.b * v.powi(3)
                    + self.c * v * grade.cos()
                    + self.d * v * grade.sin()
                    + self.e * v * accel;
                raw.max(self.idle_consumption)
            })
            .collect();
        log::debug!(
            "statistical model: {} samples, mean consumption {:.4} l/h",
            consumption.len(),
            consumption.mean().unwrap_or_default()
        );
        self.consumption = consumption.clone();
        Ok(consumption)
    }
}

impl SerdeAPI for StatisticalModel {
    fn init(&mut self) -> anyhow::Result<()> {
        ensure!(
            self.idle_consumption >= 0.0,
            format_dbg!(self.idle_consumption >= 0.0)
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standstill_is_floored_at_idle() {
        // a = 1.41 is below the 1.5 l/h floor
        let mut model = StatisticalModel::default();
        let consumption = model
            .calculate_consumption(&array![0.0], &array![0.0], &array![0.0])
            .unwrap();
        assert_eq!(consumption[0], 1.5);
    }

    #[test]
    fn test_standstill_returns_constant_above_idle() {
        let mut model = StatisticalModel::raised_constant();
        let consumption = model
            .calculate_consumption(&array![0.0], &array![0.0], &array![0.0])
            .unwrap();
        assert_eq!(consumption[0], 1.57);
    }

    #[test]
    fn test_presets_differ_only_in_constant() {
        let base = StatisticalModel::default();
        let raised = StatisticalModel::raised_constant();
        assert_eq!(raised.a, 1.57);
        assert_eq!(
            StatisticalModel {
                a: base.a,
                ..raised.clone()
            },
            base
        );
        assert_eq!(
            StatisticalModel::new(1.57, 0.000134, 0.0670, 1.90, 0.197, 1.5).unwrap(),
            raised
        );
    }

    #[test]
    fn test_coasting_downhill_is_floored() {
        let mut model = StatisticalModel::default();
        let consumption = model
            .calculate_consumption(&array![50.0, 50.0], &array![-1.0, 0.0], &array![-0.05, 0.0])
            .unwrap();
        assert_eq!(consumption[0], model.idle_consumption);
        assert!(consumption[1] > model.idle_consumption);
    }

    #[test]
    fn test_formula() {
        let mut model = StatisticalModel::default();
        let consumption = model
            .calculate_consumption(&array![72.0], &array![0.5], &array![0.02])
            .unwrap();
        let v = 20.0_f64;
        let expected = 1.41
            + 0.000134 * v.powi(3)
            + 0.0670 * v * 0.02_f64.cos()
            + 1.90 * v * 0.02_f64.sin()
            + 0.197 * v * 0.5;
        assert!(consumption[0].approx_eq(&expected, 1e-12));
        assert_eq!(model.consumption, consumption);
    }

    #[test]
    fn test_length_mismatch() {
        let mut model = StatisticalModel::default();
        assert!(model
            .calculate_consumption(&array![0.0, 1.0], &array![0.0, 0.0], &array![0.0])
            .is_err());
    }

    #[test]
    fn test_negative_idle_is_rejected() {
        assert!(StatisticalModel::new(1.41, 0.000134, 0.0670, 1.90, 0.197, -1.0).is_err());
        assert!(StatisticalModel::from_yaml("idle_consumption: -0.5\n").is_err());
    }
}
