//! Acceleration and interval times from a timestamped speed series.

use crate::imports::*;
use crate::params::KMPH_PER_MPS;
use chrono::NaiveDateTime;

/// Timestamp format of GPS points, e.g. `2020-07-10T07:14:51`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Returns acceleration, $\frac{m}{s^2}$, as forward difference of speed.
///
/// The first element is 0, as is every element whose interval time is 0.
///
/// # Arguments
/// - `speed_kmph`: vehicle speed, $\frac{km}{h}$
/// - `dt_s`: time since the previous sample, $s$
pub fn calc_acceleration(speed_kmph: &Array1<f64>, dt_s: &Array1<f64>) -> anyhow::Result<Array1<f64>> {
    ensure_equal_len(&[("speed", speed_kmph.len()), ("dt", dt_s.len())])?;
    let dv_mps = diff(&(speed_kmph / KMPH_PER_MPS));
    let mut accel = Array1::zeros(speed_kmph.len());
    for i in 1..speed_kmph.len() {
        if dt_s[i] == 0.0 {
            log::warn!("interval time of sample {i} is 0, acceleration set to 0");
        } else {
            accel[i] = dv_mps[i] / dt_s[i];
        }
    }
    Ok(accel)
}

/// Parses a timestamp in [TIMESTAMP_FORMAT]
pub fn parse_timestamp(time: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(time.trim(), TIMESTAMP_FORMAT)
        .with_context(|| format!("timestamp {time:?} does not match {TIMESTAMP_FORMAT:?}"))
}

/// Returns the absolute time difference, $s$, between two timestamps in [TIMESTAMP_FORMAT]
pub fn get_interval_time(time1: &str, time2: &str) -> anyhow::Result<f64> {
    Ok(interval_secs(&parse_timestamp(time1)?, &parse_timestamp(time2)?))
}

/// Returns the absolute time difference, $s$, between two points in time
pub fn interval_secs(time1: &NaiveDateTime, time2: &NaiveDateTime) -> f64 {
    (*time2 - *time1).num_milliseconds().abs() as f64 / 1e3
}

/// Returns the time, $s$, since the previous timestamp for each timestamp, 0 for the first
pub fn interval_times(timestamps: &[NaiveDateTime]) -> Array1<f64> {
    std::iter::once(0.0)
        .chain(
            timestamps
                .windows(2)
                .map(|pair| interval_secs(&pair[0], &pair[1])),
        )
        .take(timestamps.len())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceleration() {
        let accel = calc_acceleration(&array![0.0, 36.0, 36.0, 0.0], &array![0.0, 2.0, 1.0, 5.0]).unwrap();
        assert_eq!(accel[0], 0.0);
        assert!(accel[1].approx_eq(&5.0, 1e-12));
        assert_eq!(accel[2], 0.0);
        assert!(accel[3].approx_eq(&-2.0, 1e-12));
    }

    #[test]
    fn test_zero_dt_is_guarded() {
        let accel = calc_acceleration(&array![0.0, 36.0, 72.0], &array![0.0, 0.0, 1.0]).unwrap();
        assert!(accel.iter().all(|a| a.is_finite()));
        assert_eq!(accel[1], 0.0);
        assert!(accel[2].approx_eq(&10.0, 1e-12));
    }

    #[test]
    fn test_acceleration_length_mismatch() {
        assert!(calc_acceleration(&array![0.0, 36.0], &array![0.0]).is_err());
        assert_eq!(calc_acceleration(&Array1::zeros(0), &Array1::zeros(0)).unwrap().len(), 0);
    }

    #[test]
    fn test_interval_time() {
        assert_eq!(
            get_interval_time("2020-07-10T07:14:51", "2020-07-10T07:15:01").unwrap(),
            10.0
        );
        assert_eq!(
            get_interval_time("2020-07-10T07:15:01", "2020-07-10T07:14:51").unwrap(),
            10.0
        );
        assert!(get_interval_time("2020-07-10 07:14:51", "2020-07-10T07:15:01").is_err());
    }

    #[test]
    fn test_interval_times() {
        let timestamps: Vec<NaiveDateTime> = ["2020-07-10T07:14:51", "2020-07-10T07:14:56", "2020-07-10T07:15:02"]
            .iter()
            .map(|t| parse_timestamp(t).unwrap())
            .collect();
        assert_eq!(interval_times(&timestamps), array![0.0, 5.0, 6.0]);
        assert_eq!(interval_times(&[]).len(), 0);
    }
}
