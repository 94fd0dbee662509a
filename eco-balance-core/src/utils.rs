//! Module containing miscellaneous utility functions.

use crate::imports::*;

/// Returns the element-wise difference to the previous element, with 0 as the first element.
pub fn diff(x: &Array1<f64>) -> Array1<f64> {
    let mut dx = Array1::zeros(x.len());
    for i in 1..x.len() {
        dx[i] = x[i] - x[i - 1];
    }
    dx
}

/// return cumsum <f64> of arr
pub fn ndarrcumsum(arr: &Array1<f64>) -> Array1<f64> {
    arr.iter()
        .scan(0.0, |acc, &x| {
            *acc += x;
            Some(*acc)
        })
        .collect()
}

/// Ensures that all named series have the same length as the first one.
///
/// # Arguments
/// - `series`: pairs of series name and series length
pub fn ensure_equal_len(series: &[(&str, usize)]) -> anyhow::Result<()> {
    if let Some((first_name, first_len)) = series.first() {
        for (name, len) in series.iter().skip(1) {
            ensure!(
                len == first_len,
                "The arrays {} must have the same length! `{}` has length {}, `{}` has length {}",
                series
                    .iter()
                    .map(|(name, _)| format!("`{name}`"))
                    .collect::<Vec<String>>()
                    .join(", "),
                first_name,
                first_len,
                name,
                len
            );
        }
    }
    Ok(())
}

/// Linear interpolation between two support points that saturates outside of them,
/// i.e. never extrapolates.  The support points may be given in either order.
///
/// # Arguments
/// - `x`: value at which to interpolate
/// - `(x0, y0)`, `(x1, y1)`: support points
pub fn interpolate_clamped(x: f64, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> f64 {
    // x-coordinates must ascend for the saturation checks below
    let ((xl, yl), (xr, yr)) = if x0 <= x1 {
        ((x0, y0), (x1, y1))
    } else {
        ((x1, y1), (x0, y0))
    };
    if x <= xl {
        yl
    } else if x >= xr {
        yr
    } else {
        yl + (yr - yl) / (xr - xl) * (x - xl)
    }
}

/// Value that is either constant for a whole trip or given per sample
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarOrArray {
    Scalar(f64),
    Array(Vec<f64>),
}

impl ScalarOrArray {
    /// Returns a series of length `len`, repeating a scalar or checking the length of an array.
    ///
    /// # Arguments
    /// - `len`: length of the sample series this value applies to
    /// - `name`: name used in the error message on length mismatch
    pub fn broadcast(&self, len: usize, name: &str) -> anyhow::Result<Array1<f64>> {
        match self {
            Self::Scalar(val) => Ok(Array1::from_elem(len, *val)),
            Self::Array(arr) => {
                ensure!(
                    arr.len() == len,
                    "`{name}` has length {} but {len} samples were given",
                    arr.len()
                );
                Ok(Array1::from_vec(arr.clone()))
            }
        }
    }

    /// Applies `f` element-wise, preserving the shape
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        match self {
            Self::Scalar(val) => Self::Scalar(f(*val)),
            Self::Array(arr) => Self::Array(arr.iter().map(|x| f(*x)).collect()),
        }
    }

    /// Returns true if `pred` holds for every element
    pub fn all<F: Fn(f64) -> bool>(&self, pred: F) -> bool {
        match self {
            Self::Scalar(val) => pred(*val),
            Self::Array(arr) => arr.iter().all(|x| pred(*x)),
        }
    }
}

impl From<f64> for ScalarOrArray {
    fn from(val: f64) -> Self {
        Self::Scalar(val)
    }
}

impl From<Array1<f64>> for ScalarOrArray {
    fn from(arr: Array1<f64>) -> Self {
        Self::Array(arr.to_vec())
    }
}

impl From<Vec<f64>> for ScalarOrArray {
    fn from(vec: Vec<f64>) -> Self {
        Self::Array(vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff() {
        assert_eq!(diff(&Array1::range(0.0, 3.0, 1.0)), array![0.0, 1.0, 1.0]);
        assert_eq!(diff(&Array1::zeros(0)), Array1::<f64>::zeros(0));
    }

    #[test]
    fn test_ndarrcumsum_expected_output() {
        let xs = Array1::from_vec(vec![0.0, 1.0, 2.0, 3.0]);
        let expected_ys = Array1::from_vec(vec![0.0, 1.0, 3.0, 6.0]);
        let ys = ndarrcumsum(&xs);
        for (i, (ye, y)) in expected_ys.iter().zip(ys.iter()).enumerate() {
            assert_eq!(ye, y, "unequal at {}", i);
        }
    }

    #[test]
    fn test_ensure_equal_len() {
        assert!(ensure_equal_len(&[("speed", 3), ("accel", 3), ("grade", 3)]).is_ok());
        assert!(ensure_equal_len(&[]).is_ok());
        let err = ensure_equal_len(&[("speed", 3), ("accel", 2)]).unwrap_err();
        assert!(err.to_string().contains("`accel` has length 2"));
    }

    #[test]
    fn test_interpolate_clamped_inside() {
        assert_eq!(interpolate_clamped(0.5, (0.0, 0.0), (1.0, 10.0)), 5.0);
        assert!(interpolate_clamped(0.0, (-2.0, 0.1), (2.0, 0.4)).approx_eq(&0.25, 1e-12));
    }

    #[test]
    fn test_interpolate_clamped_saturates() {
        assert_eq!(interpolate_clamped(-5.0, (0.0, 0.0), (1.0, 10.0)), 0.0);
        assert_eq!(interpolate_clamped(1.01, (0.0, 0.0), (1.0, 10.0)), 10.0);
    }

    #[test]
    fn test_interpolate_clamped_with_descending_support_points() {
        // same line as ascending support points
        assert_eq!(interpolate_clamped(0.5, (1.0, 10.0), (0.0, 0.0)), 5.0);
        assert_eq!(interpolate_clamped(2.0, (1.0, 10.0), (0.0, 0.0)), 10.0);
        assert_eq!(interpolate_clamped(-1.0, (1.0, 10.0), (0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_broadcast() {
        let scalar = ScalarOrArray::from(0.02);
        assert_eq!(scalar.broadcast(3, "cr").unwrap(), array![0.02, 0.02, 0.02]);
        let arr = ScalarOrArray::from(vec![0.02, 0.015]);
        assert_eq!(arr.broadcast(2, "cr").unwrap(), array![0.02, 0.015]);
        assert!(arr.broadcast(3, "cr").is_err());
    }

    #[test]
    fn test_map_preserves_shape() {
        assert_eq!(ScalarOrArray::from(2.0).map(|x| x * 2.0), ScalarOrArray::Scalar(4.0));
        assert_eq!(
            ScalarOrArray::from(vec![1.0, 2.0]).map(|x| x * 2.0),
            ScalarOrArray::from(vec![2.0, 4.0])
        );
    }

    #[test]
    fn test_scalar_or_array_serde() {
        let scalar: ScalarOrArray = serde_json::from_str("0.02").unwrap();
        assert_eq!(scalar, ScalarOrArray::Scalar(0.02));
        let arr: ScalarOrArray = serde_yaml::from_str("[0.02, 0.033]").unwrap();
        assert_eq!(arr, ScalarOrArray::Array(vec![0.02, 0.033]));
    }
}
