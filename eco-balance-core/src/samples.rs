//! GPS trajectories and the kinematic sample series derived from them.

use crate::elevation::fill_elevation;
use crate::geo::{calc_gradient_angle, track_distance_km};
use crate::imports::*;
use crate::kinematics::{calc_acceleration, interval_times};
use crate::road::rolling_coefs_for_surfaces;
use chrono::NaiveDateTime;

/// Single GPS fix, e.g. one row of a track CSV file
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GpsPoint {
    /// Timestamp, `YYYY-MM-DDTHH:MM:SS`
    pub time: NaiveDateTime,
    /// Latitude, $\degree$
    pub latitude: f64,
    /// Longitude, $\degree$
    pub longitude: f64,
    /// GPS altitude, $m$
    #[serde(alias = "GPS Altitude.value")]
    pub altitude: f64,
    /// Vehicle speed, $\frac{km}{h}$
    #[serde(alias = "speed", alias = "Speed.value")]
    pub speed_kmph: f64,
    /// Road surface tag from map matching
    #[serde(default)]
    pub surface: Option<String>,
    /// Elevation from an elevation service, $m$, preferred over `altitude` when present
    #[serde(default)]
    pub elevation: Option<f64>,
}

/// Timestamped GPS points of one trip
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    pub points: Vec<GpsPoint>,
}

impl SerdeAPI for Trajectory {
    const ACCEPTED_BYTE_FORMATS: &'static [&'static str] = &["yaml", "json", "bin", "csv"];
    const ACCEPTED_STR_FORMATS: &'static [&'static str] = &["yaml", "json", "csv"];

    fn init(&mut self) -> anyhow::Result<()> {
        ensure!(!self.points.is_empty(), "Deserialized trajectory is empty");
        ensure!(
            self.points.windows(2).all(|pair| pair[0].time <= pair[1].time),
            "Deserialized trajectory is not sorted in time"
        );
        Ok(())
    }

    fn to_writer<W: std::io::Write>(&self, wtr: W, format: &str) -> anyhow::Result<()> {
        match format.trim_start_matches('.').to_lowercase().as_str() {
            "yaml" | "yml" => serde_yaml::to_writer(wtr, self)?,
            "json" => serde_json::to_writer(wtr, self)?,
            "bin" => bincode::serialize_into(wtr, self)?,
            "csv" => {
                let mut wtr = csv::Writer::from_writer(wtr);
                for point in &self.points {
                    wtr.serialize(point)?;
                }
                wtr.flush()?
            }
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_BYTE_FORMATS
            ),
        }
        Ok(())
    }

    fn to_str(&self, format: &str) -> anyhow::Result<String> {
        match format.trim_start_matches('.').to_lowercase().as_str() {
            "yaml" | "yml" => self.to_yaml(),
            "json" => self.to_json(),
            "csv" => {
                let mut buf = Vec::with_capacity(self.len());
                self.to_writer(&mut buf, "csv")?;
                Ok(String::from_utf8(buf)?)
            }
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_STR_FORMATS
            ),
        }
    }

    fn from_str<S: AsRef<str>>(contents: S, format: &str) -> anyhow::Result<Self> {
        match format.trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Self::from_reader(contents.as_ref().as_bytes(), "csv"),
            "yaml" | "yml" => Self::from_yaml(contents),
            "json" => Self::from_json(contents),
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_STR_FORMATS
            ),
        }
    }

    fn from_reader<R: std::io::Read>(rdr: R, format: &str) -> anyhow::Result<Self> {
        let mut deserialized: Self = match format.trim_start_matches('.').to_lowercase().as_str() {
            "yaml" | "yml" => serde_yaml::from_reader(rdr)?,
            "json" => serde_json::from_reader(rdr)?,
            "bin" => bincode::deserialize_from(rdr)?,
            "csv" => {
                let mut rdr = csv::Reader::from_reader(rdr);
                let points = rdr
                    .deserialize()
                    .enumerate()
                    .map(|(i, result)| result.with_context(|| format!("invalid GPS point in row {}", i + 1)))
                    .collect::<anyhow::Result<Vec<GpsPoint>>>()?;
                Self { points }
            }
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_BYTE_FORMATS
            ),
        };
        deserialized.init()?;
        Ok(deserialized)
    }
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Trip distance, $km$, along the GPS points
    pub fn distance_km(&self) -> f64 {
        track_distance_km(
            &self
                .points
                .iter()
                .map(|p| (p.latitude, p.longitude))
                .collect::<Vec<_>>(),
        )
    }

    /// Sample series of the trajectory, see [SampleSeries::from_gps_points]
    pub fn to_samples(&self) -> anyhow::Result<SampleSeries> {
        Ok(SampleSeries::from_gps_points(&self.points)?.0)
    }
}

/// Row of a sample series CSV file
#[derive(Default, PartialEq, Clone, Debug, Deserialize, Serialize)]
pub struct SampleElement {
    /// speed, $\frac{km}{h}$
    #[serde(alias = "speed")]
    pub speed_kmph: f64,
    /// acceleration, $\frac{m}{s^2}$
    #[serde(alias = "acceleration")]
    pub accel_mps2: f64,
    /// gradient angle, $rad$
    #[serde(alias = "gradient_angle")]
    pub grade_rad: f64,
    /// time since previous sample, $s$
    #[serde(alias = "dt")]
    pub dt_s: f64,
    /// rolling resistance coefficient
    #[serde(default)]
    pub rolling_coef: Option<f64>,
}

/// Parallel per-sample series of a trip in chronological order
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SampleSeries {
    /// Vehicle speed, $\frac{km}{h}$
    pub speed_kmph: Array1<f64>,
    /// Vehicle acceleration, $\frac{m}{s^2}$
    pub accel_mps2: Array1<f64>,
    /// Road gradient angle, $rad$
    pub grade_rad: Array1<f64>,
    /// Time since the previous sample, $s$, 0 for the first sample
    pub dt_s: Array1<f64>,
    /// Rolling resistance coefficient per sample, if known
    #[serde(default)]
    pub rolling_coef: Option<Array1<f64>>,
}

impl SerdeAPI for SampleSeries {
    const ACCEPTED_BYTE_FORMATS: &'static [&'static str] = &["yaml", "json", "bin", "csv"];
    const ACCEPTED_STR_FORMATS: &'static [&'static str] = &["yaml", "json", "csv"];

    fn init(&mut self) -> anyhow::Result<()> {
        self.init_checks()
    }

    fn to_writer<W: std::io::Write>(&self, wtr: W, format: &str) -> anyhow::Result<()> {
        match format.trim_start_matches('.').to_lowercase().as_str() {
            "yaml" | "yml" => serde_yaml::to_writer(wtr, self)?,
            "json" => serde_json::to_writer(wtr, self)?,
            "bin" => bincode::serialize_into(wtr, self)?,
            "csv" => {
                let mut wtr = csv::Writer::from_writer(wtr);
                for i in 0..self.len() {
                    wtr.serialize(SampleElement {
                        speed_kmph: self.speed_kmph[i],
                        accel_mps2: self.accel_mps2[i],
                        grade_rad: self.grade_rad[i],
                        dt_s: self.dt_s[i],
                        rolling_coef: self.rolling_coef.as_ref().map(|cr| cr[i]),
                    })?;
                }
                wtr.flush()?
            }
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_BYTE_FORMATS
            ),
        }
        Ok(())
    }

    fn to_str(&self, format: &str) -> anyhow::Result<String> {
        match format.trim_start_matches('.').to_lowercase().as_str() {
            "yaml" | "yml" => self.to_yaml(),
            "json" => self.to_json(),
            "csv" => self.to_csv(),
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_STR_FORMATS
            ),
        }
    }

    fn from_str<S: AsRef<str>>(contents: S, format: &str) -> anyhow::Result<Self> {
        match format.trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Self::from_reader(contents.as_ref().as_bytes(), "csv"),
            "yaml" | "yml" => Self::from_yaml(contents),
            "json" => Self::from_json(contents),
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_STR_FORMATS
            ),
        }
    }

    fn from_reader<R: std::io::Read>(rdr: R, format: &str) -> anyhow::Result<Self> {
        let mut deserialized: Self = match format.trim_start_matches('.').to_lowercase().as_str() {
            "yaml" | "yml" => serde_yaml::from_reader(rdr)?,
            "json" => serde_json::from_reader(rdr)?,
            "bin" => bincode::deserialize_from(rdr)?,
            "csv" => {
                let mut rdr = csv::Reader::from_reader(rdr);
                let elements = rdr
                    .deserialize()
                    .collect::<Result<Vec<SampleElement>, csv::Error>>()?;
                Self::from_elements(&elements)?
            }
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_BYTE_FORMATS
            ),
        };
        deserialized.init()?;
        Ok(deserialized)
    }
}

impl SampleSeries {
    /// Creates a validated sample series without rolling resistance coefficients
    ///
    /// # Arguments
    /// - `speed_kmph`: vehicle speed, $\frac{km}{h}$
    /// - `accel_mps2`: vehicle acceleration, $\frac{m}{s^2}$
    /// - `grade_rad`: road gradient angle, $rad$
    /// - `dt_s`: time since the previous sample, $s$
    pub fn new(
        speed_kmph: Array1<f64>,
        accel_mps2: Array1<f64>,
        grade_rad: Array1<f64>,
        dt_s: Array1<f64>,
    ) -> anyhow::Result<Self> {
        let samples = Self {
            speed_kmph,
            accel_mps2,
            grade_rad,
            dt_s,
            rolling_coef: None,
        };
        samples.init_checks()?;
        Ok(samples)
    }

    pub fn len(&self) -> usize {
        self.speed_kmph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn init_checks(&self) -> anyhow::Result<()> {
        let mut lens = vec![
            ("speed_kmph", self.speed_kmph.len()),
            ("accel_mps2", self.accel_mps2.len()),
            ("grade_rad", self.grade_rad.len()),
            ("dt_s", self.dt_s.len()),
        ];
        if let Some(rolling_coef) = &self.rolling_coef {
            lens.push(("rolling_coef", rolling_coef.len()));
        }
        ensure_equal_len(&lens)?;
        ensure!(
            self.dt_s.iter().all(|dt| *dt >= 0.0 && dt.is_finite()),
            "interval times must be finite and non-negative"
        );
        Ok(())
    }

    fn from_elements(elements: &[SampleElement]) -> anyhow::Result<Self> {
        let n_rolling_coefs = elements.iter().filter(|el| el.rolling_coef.is_some()).count();
        ensure!(
            n_rolling_coefs == 0 || n_rolling_coefs == elements.len(),
            "`rolling_coef` must be given for all or none of the samples, got {n_rolling_coefs} of {}",
            elements.len()
        );
        Ok(Self {
            speed_kmph: elements.iter().map(|el| el.speed_kmph).collect(),
            accel_mps2: elements.iter().map(|el| el.accel_mps2).collect(),
            grade_rad: elements.iter().map(|el| el.grade_rad).collect(),
            dt_s: elements.iter().map(|el| el.dt_s).collect(),
            rolling_coef: elements
                .iter()
                .map(|el| el.rolling_coef)
                .collect::<Option<Array1<f64>>>()
                .filter(|_| n_rolling_coefs > 0),
        })
    }

    /// Write (serialize) sample series to a CSV string
    pub fn to_csv(&self) -> anyhow::Result<String> {
        let mut buf = Vec::with_capacity(self.len());
        self.to_writer(&mut buf, "csv")?;
        Ok(String::from_utf8(buf)?)
    }

    /// Derives a sample series from GPS points and returns it with the trip distance, $km$.
    ///
    /// - interval times from the timestamps, 0 for the first point
    /// - gradient angles between consecutive points, 0 for the first point, using service
    ///   elevations where present and GPS altitude otherwise
    /// - acceleration as forward difference of speed
    /// - rolling resistance coefficients from surface tags if any point carries one
    pub fn from_gps_points(points: &[GpsPoint]) -> anyhow::Result<(Self, f64)> {
        let times: Vec<NaiveDateTime> = points.iter().map(|p| p.time).collect();
        ensure!(
            times.windows(2).all(|pair| pair[0] <= pair[1]),
            "GPS points must be sorted in time"
        );
        let speed_kmph: Array1<f64> = points.iter().map(|p| p.speed_kmph).collect();
        let dt_s = interval_times(&times);
        let accel_mps2 = calc_acceleration(&speed_kmph, &dt_s)?;

        let altitude = fill_elevation(
            &points.iter().map(|p| p.elevation).collect::<Vec<_>>(),
            &points.iter().map(|p| p.altitude).collect::<Array1<f64>>(),
        )?;
        let mut grade_rad = Array1::zeros(points.len());
        for i in 1..points.len() {
            grade_rad[i] = calc_gradient_angle(
                (points[i - 1].latitude, points[i - 1].longitude, altitude[i - 1]),
                (points[i].latitude, points[i].longitude, altitude[i]),
            );
        }

        let rolling_coef = if points.iter().any(|p| p.surface.is_some()) {
            Some(rolling_coefs_for_surfaces(
                &points.iter().map(|p| p.surface.as_deref()).collect::<Vec<_>>(),
            ))
        } else {
            None
        };

        let distance_km = track_distance_km(
            &points
                .iter()
                .map(|p| (p.latitude, p.longitude))
                .collect::<Vec<_>>(),
        );
        let samples = Self {
            speed_kmph,
            accel_mps2,
            grade_rad,
            dt_s,
            rolling_coef,
        };
        samples.init_checks()?;
        log::debug!(
            "derived {} samples over {distance_km:.3} km from GPS points",
            samples.len()
        );
        Ok((samples, distance_km))
    }

    /// Per-sample rolling resistance coefficients if known, else `default`
    pub fn rolling_coef_or(&self, default: &ScalarOrArray) -> ScalarOrArray {
        match &self.rolling_coef {
            Some(rolling_coef) => ScalarOrArray::from(rolling_coef.clone()),
            None => default.clone(),
        }
    }
}
