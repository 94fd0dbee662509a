//! Distances and gradient angles between GPS coordinates.
//!
//! Coordinates are `(latitude, longitude)` in degrees, points add the altitude in $m$:
//! `(latitude, longitude, altitude)`.

use crate::imports::*;
use crate::params::M_PER_KM;
use ::geo::{GeodesicDistance, HaversineDistance, Point};
use std::fmt;
use std::str::FromStr;

/// Method for distances on the earth's surface
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DistanceMethod {
    /// Geodesic distance on an ellipsoid (Karney)
    #[default]
    #[serde(rename = "geodetic")]
    Geodesic,
    /// Great-circle (haversine) distance on a sphere of mean earth radius
    #[serde(rename = "great-circle")]
    GreatCircle,
}

impl DistanceMethod {
    pub const ALL: [DistanceMethod; 2] = [DistanceMethod::Geodesic, DistanceMethod::GreatCircle];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Geodesic => "geodetic",
            Self::GreatCircle => "great-circle",
        }
    }
}

impl fmt::Display for DistanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s.trim().to_lowercase())
            .with_context(|| {
                format!(
                    "distance method {s:?} is unknown, must be one of {:?}",
                    Self::ALL.map(|method| method.as_str())
                )
            })
    }
}

/// Reference ellipsoid of geodesic distances
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ellipsoid {
    #[default]
    #[serde(rename = "WGS-84")]
    Wgs84,
}

impl Ellipsoid {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wgs84 => "WGS-84",
        }
    }
}

impl fmt::Display for Ellipsoid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ellipsoid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_uppercase().replace('_', "-").as_str() {
            "WGS-84" | "WGS84" => Ok(Self::Wgs84),
            _ => bail!("ellipsoid {s:?} is unknown, must be \"WGS-84\""),
        }
    }
}

/// Returns distance, $m$, between two `(latitude, longitude)` coordinates
pub fn calc_distance(
    coord1: (f64, f64),
    coord2: (f64, f64),
    method: DistanceMethod,
    ellipsoid: Ellipsoid,
) -> f64 {
    // `geo` points are (x, y) = (longitude, latitude)
    let p1 = Point::new(coord1.1, coord1.0);
    let p2 = Point::new(coord2.1, coord2.0);
    match (method, ellipsoid) {
        (DistanceMethod::Geodesic, Ellipsoid::Wgs84) => p1.geodesic_distance(&p2),
        (DistanceMethod::GreatCircle, _) => p1.haversine_distance(&p2),
    }
}

/// Returns the gradient angle, $rad$, between two `(latitude, longitude, altitude)`
/// points, or 0 if they share the same horizontal position
pub fn calc_gradient_angle(point1: (f64, f64, f64), point2: (f64, f64, f64)) -> f64 {
    let dist = calc_distance(
        (point1.0, point1.1),
        (point2.0, point2.1),
        DistanceMethod::default(),
        Ellipsoid::default(),
    );
    if dist == 0.0 {
        0.0
    } else {
        (point2.2 - point1.2).atan2(dist)
    }
}

/// Returns the length, $km$, of a track of `(latitude, longitude)` coordinates as the sum
/// of geodesic distances between consecutive coordinates
pub fn track_distance_km(coords: &[(f64, f64)]) -> f64 {
    coords
        .windows(2)
        .map(|pair| calc_distance(pair[0], pair[1], DistanceMethod::default(), Ellipsoid::default()))
        .sum::<f64>()
        / M_PER_KM
}
