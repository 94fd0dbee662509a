//! Integration of instantaneous consumption into trip totals.
//!
//! The same integral serves both consumption types:
//! $kW \cdot s = \frac{kWh}{3600}$ and $\frac{l}{h} \cdot s = \frac{l}{3600}$.

use crate::consumption::ConsumptionType;
use crate::imports::*;
use crate::params::SECS_PER_HOUR;
use std::fmt;

/// Returns total consumption, $l$ or $kWh$
///
/// # Arguments
/// - `consumption`: instantaneous consumption, $\frac{l}{h}$ or $kW$
/// - `dt_s`: time since the previous sample, $s$
pub fn accumulate_consumption(consumption: &Array1<f64>, dt_s: &Array1<f64>) -> anyhow::Result<f64> {
    ensure_equal_len(&[("consumption", consumption.len()), ("dt", dt_s.len())])?;
    Ok((consumption * dt_s).sum() / SECS_PER_HOUR)
}

/// Returns total consumption after each sample, $l$ or $kWh$
pub fn cumulative_consumption(
    consumption: &Array1<f64>,
    dt_s: &Array1<f64>,
) -> anyhow::Result<Array1<f64>> {
    ensure_equal_len(&[("consumption", consumption.len()), ("dt", dt_s.len())])?;
    Ok(ndarrcumsum(&(consumption * dt_s)) / SECS_PER_HOUR)
}

/// Returns consumption per 100 km, $\frac{l}{100 km}$ or $\frac{kWh}{100 km}$
///
/// # Arguments
/// - `consumption`: instantaneous consumption, $\frac{l}{h}$ or $kW$
/// - `dt_s`: time since the previous sample, $s$
/// - `distance_km`: trip distance, $km$
pub fn consumption_per_100km(
    consumption: &Array1<f64>,
    dt_s: &Array1<f64>,
    distance_km: f64,
) -> anyhow::Result<f64> {
    ensure_valid_distance(distance_km)?;
    Ok(100.0 * accumulate_consumption(consumption, dt_s)? / distance_km)
}

fn ensure_valid_distance(distance_km: f64) -> anyhow::Result<()> {
    ensure!(
        distance_km != 0.0 && distance_km.is_finite(),
        "trip distance must be finite and non-zero to normalize consumption, got {distance_km} km"
    );
    Ok(())
}

/// Trip-level consumption
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TripSummary {
    pub consumption_type: ConsumptionType,
    /// Total consumption, $l$ or $kWh$
    pub total: f64,
    /// Unit of `total`
    pub total_unit: String,
    /// Consumption per 100 km, $\frac{l}{100 km}$ or $\frac{kWh}{100 km}$
    pub per_100km: f64,
    /// Unit of `per_100km`
    pub per_100km_unit: String,
    /// Trip distance, $km$
    pub distance_km: f64,
    /// Trip duration, $s$
    pub duration_s: f64,
}

impl TripSummary {
    /// Summarizes an instantaneous consumption series
    ///
    /// # Arguments
    /// - `consumption`: instantaneous consumption, $\frac{l}{h}$ or $kW$
    /// - `dt_s`: time since the previous sample, $s$
    /// - `distance_km`: trip distance, $km$
    /// - `consumption_type`: unit regime of `consumption`
    pub fn new(
        consumption: &Array1<f64>,
        dt_s: &Array1<f64>,
        distance_km: f64,
        consumption_type: ConsumptionType,
    ) -> anyhow::Result<Self> {
        ensure_valid_distance(distance_km)?;
        let total = accumulate_consumption(consumption, dt_s)?;
        let per_100km = 100.0 * total / distance_km;
        let summary = Self {
            consumption_type,
            total,
            total_unit: consumption_type.total_unit().into(),
            per_100km,
            per_100km_unit: consumption_type.per_100km_unit().into(),
            distance_km,
            duration_s: dt_s.sum(),
        };
        log::debug!("{summary}");
        Ok(summary)
    }
}

impl SerdeAPI for TripSummary {}

impl fmt::Display for TripSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4} {} over {:.3} km in {} s ({:.3} {})",
            self.total,
            self.total_unit,
            self.distance_km,
            self.duration_s,
            self.per_100km,
            self.per_100km_unit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate() {
        let total = accumulate_consumption(&array![0.0, 6.0, 6.0], &array![0.0, 1_800.0, 1_800.0]).unwrap();
        assert_eq!(total, 6.0);
        assert_eq!(accumulate_consumption(&Array1::zeros(0), &Array1::zeros(0)).unwrap(), 0.0);
    }

    #[test]
    fn test_accumulate_is_linear() {
        let consumption = array![1.5, 3.7, 8.2, -4.1, 2.0];
        let dt = array![0.0, 1.0, 2.0, 1.5, 3.0];
        let k = 2.5;
        let scaled = accumulate_consumption(&(&consumption * k), &dt).unwrap();
        let total = accumulate_consumption(&consumption, &dt).unwrap();
        assert!(scaled.approx_eq(&(k * total), 1e-12));
    }

    #[test]
    fn test_per_100km_matches_total() {
        let consumption = array![1.5, 3.7, 8.2, 2.0];
        let dt = array![0.0, 1.0, 2.0, 3.0];
        let d = 0.07;
        let total = accumulate_consumption(&consumption, &dt).unwrap();
        assert_eq!(
            consumption_per_100km(&consumption, &dt, d).unwrap(),
            100.0 * total / d
        );
    }

    #[test]
    fn test_zero_distance_is_rejected() {
        assert!(consumption_per_100km(&array![1.0], &array![1.0], 0.0).is_err());
        assert!(TripSummary::new(&array![1.0], &array![1.0], 0.0, ConsumptionType::Fuel).is_err());
    }

    #[test]
    fn test_length_mismatch() {
        assert!(accumulate_consumption(&array![1.0, 2.0], &array![1.0]).is_err());
    }

    #[test]
    fn test_cumulative() {
        let cumulative = cumulative_consumption(&array![0.0, 3_600.0, 7_200.0], &array![0.0, 1.0, 1.0]).unwrap();
        assert_eq!(cumulative, array![0.0, 1.0, 3.0]);
    }

    #[test]
    fn test_summary() {
        let summary = TripSummary::new(
            &array![0.0, 10.0, 10.0],
            &array![0.0, 1_800.0, 1_800.0],
            50.0,
            ConsumptionType::Energy,
        )
        .unwrap();
        assert_eq!(summary.total, 10.0);
        assert_eq!(summary.per_100km, 20.0);
        assert_eq!(summary.total_unit, "kWh");
        assert_eq!(summary.per_100km_unit, "kWh/100km");
        assert_eq!(summary.duration_s, 3_600.0);
        let consumption = array![0.0, 4.2, 7.9, 3.3];
        let dt = array![0.0, 1.0, 2.0, 1.0];
        let summary = TripSummary::new(&consumption, &dt, 0.04, ConsumptionType::Fuel).unwrap();
        assert_eq!(
            summary.per_100km,
            consumption_per_100km(&consumption, &dt, 0.04).unwrap()
        );
        assert_eq!(summary.per_100km, 100.0 * summary.total / 0.04);
        let de = TripSummary::from_json(summary.to_json().unwrap()).unwrap();
        assert_eq!(de, summary);
    }
}
