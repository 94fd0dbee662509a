//! Gap filling of elevation series.
//!
//! Elevation services may fail for single requests and return no value for some
//! samples.  Requesting elevations is up to the caller.

use crate::imports::*;

/// Returns `service` elevations, $m$, with missing values replaced by the GPS altitude at
/// the same index
///
/// # Arguments
/// - `service`: elevation per sample from an elevation service, `None` where unavailable
/// - `gps_altitude`: altitude per sample as recorded by the GPS receiver
pub fn fill_elevation(service: &[Option<f64>], gps_altitude: &Array1<f64>) -> anyhow::Result<Array1<f64>> {
    ensure_equal_len(&[
        ("service_elevation", service.len()),
        ("gps_altitude", gps_altitude.len()),
    ])?;
    let mut n_filled = 0;
    let elevation = service
        .iter()
        .zip(gps_altitude)
        .map(|(elev, alt)| match elev {
            Some(elev) if elev.is_finite() => *elev,
            _ => {
                n_filled += 1;
                *alt
            }
        })
        .collect();
    if n_filled > 0 {
        log::debug!("filled {n_filled} missing elevations with GPS altitude");
    }
    Ok(elevation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaps_are_filled_from_gps() {
        let service = [Some(60.0), None, Some(f64::NAN), Some(63.5)];
        let filled = fill_elevation(&service, &array![59.0, 61.0, 62.0, 64.0]).unwrap();
        assert_eq!(filled, array![60.0, 61.0, 62.0, 63.5]);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(fill_elevation(&[Some(1.0)], &array![1.0, 2.0]).is_err());
    }
}
