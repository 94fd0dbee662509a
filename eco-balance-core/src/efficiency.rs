//! Drivetrain efficiency as a function of driving resistance.
//!
//! Efficiency is interpolated linearly between two resistance/efficiency support points
//! and saturates outside of them.  Resistance may be negative (deceleration, descent), so
//! the support points are sorted internally and may be supplied in either order.

use crate::imports::*;

/// Returns efficiency at driving resistance `res`.
///
/// # Arguments
/// - `res`: driving resistance, $N$
/// - `res_min`, `res_max`: resistance support points, $N$
/// - `eff_min`, `eff_max`: efficiencies at `res_min` and `res_max`, respectively
pub fn calc_efficiency(res: f64, res_min: f64, res_max: f64, eff_min: f64, eff_max: f64) -> f64 {
    interpolate_clamped(res, (res_min, eff_min), (res_max, eff_max))
}

/// Element-wise [calc_efficiency] over a driving resistance series
pub fn calc_efficiency_arr(
    res: &Array1<f64>,
    res_min: f64,
    res_max: f64,
    eff_min: f64,
    eff_max: f64,
) -> Array1<f64> {
    res.mapv(|r| calc_efficiency(r, res_min, res_max, eff_min, eff_max))
}

/// [calc_efficiency] for either a scalar or a series, returning the same shape
pub fn calc_efficiency_for(
    res: &ScalarOrArray,
    res_min: f64,
    res_max: f64,
    eff_min: f64,
    eff_max: f64,
) -> ScalarOrArray {
    res.map(|r| calc_efficiency(r, res_min, res_max, eff_min, eff_max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{EFF_RES_MAX_N, EFF_RES_MIN_N};

    #[test]
    fn test_bounds_are_hit_exactly() {
        assert_eq!(calc_efficiency(-2_000.0, -2_000.0, 2_000.0, 0.1, 0.4), 0.1);
        assert_eq!(calc_efficiency(2_000.0, -2_000.0, 2_000.0, 0.1, 0.4), 0.4);
    }

    #[test]
    fn test_clamps_instead_of_extrapolating() {
        assert_eq!(calc_efficiency(-1e6, EFF_RES_MIN_N, EFF_RES_MAX_N, 0.1, 0.4), 0.1);
        assert_eq!(calc_efficiency(1e6, EFF_RES_MIN_N, EFF_RES_MAX_N, 0.1, 0.4), 0.4);
    }

    #[test]
    fn test_interpolates_between_bounds() {
        let eff = calc_efficiency(1_000.0, EFF_RES_MIN_N, EFF_RES_MAX_N, 0.1, 0.43);
        assert!(eff.approx_eq(&(0.1 + 0.33 * 0.75), 1e-12));
    }

    #[test]
    fn test_bounds_supplied_in_descending_order() {
        // 2000 N -> 0.4, -2000 N -> 0.1, same mapping as ascending bounds
        let ascending = calc_efficiency(500.0, -2_000.0, 2_000.0, 0.1, 0.4);
        let descending = calc_efficiency(500.0, 2_000.0, -2_000.0, 0.4, 0.1);
        assert!(ascending.approx_eq(&descending, 1e-12));
        assert_eq!(calc_efficiency(3_000.0, 2_000.0, -2_000.0, 0.4, 0.1), 0.4);
        assert_eq!(calc_efficiency(-3_000.0, 2_000.0, -2_000.0, 0.4, 0.1), 0.1);
    }

    #[test]
    fn test_constant_efficiency_for_equal_bounds() {
        let res = array![-5_000.0, -100.0, 0.0, 100.0, 5_000.0];
        let eff = calc_efficiency_arr(&res, EFF_RES_MIN_N, EFF_RES_MAX_N, 0.9, 0.9);
        assert!(eff.iter().all(|e| *e == 0.9));
    }

    #[test]
    fn test_shape_is_preserved() {
        let scalar = calc_efficiency_for(&ScalarOrArray::from(0.0), EFF_RES_MIN_N, EFF_RES_MAX_N, 0.1, 0.4);
        assert!(matches!(scalar, ScalarOrArray::Scalar(_)));
        let series = calc_efficiency_for(
            &ScalarOrArray::from(vec![-3_000.0, 0.0, 3_000.0]),
            EFF_RES_MIN_N,
            EFF_RES_MAX_N,
            0.1,
            0.4,
        );
        match series {
            ScalarOrArray::Array(eff) => {
                assert_eq!(eff.len(), 3);
                assert_eq!(eff[0], 0.1);
                assert_eq!(eff[2], 0.4);
            }
            ScalarOrArray::Scalar(_) => panic!("expected a series"),
        }
    }
}
