use anyhow::{bail, ensure, Context};
use clap::{ArgGroup, Parser};

extern crate eco_balance_core;
use eco_balance_core::params::DEFAULT_ROLLING_COEF;
use eco_balance_core::prelude::*;

/// Estimates trip fuel or energy consumption from a GPS track.
/// After running `cargo build --release`, run with
/// ```bash
/// ./target/release/eco-balance-cli --track-file eco-balance-core/tests/assets/muenster_trip.csv --veh-file eco-balance-core/tests/assets/gasoline_car.yaml
/// ```
/// or, for precomputed samples (speed, acceleration, gradient angle, interval time),
/// ```bash
/// ./target/release/eco-balance-cli --samples-file samples.csv --distance-km 12.3 --model statistical
/// ```
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(group(
    ArgGroup::new("trip")
    .required(true)
    .args(&["track-file", "samples-file"])
))]
struct EcoBalanceApi {
    #[clap(long, value_parser)]
    /// Path to GPS track file (csv with time, latitude, longitude, altitude, speed_kmph)
    track_file: Option<String>,
    #[clap(long, value_parser, requires = "distance-km")]
    /// Path to sample series file (csv, yaml, json or bin)
    samples_file: Option<String>,
    #[clap(long, value_parser)]
    /// Trip distance in km, overrides the distance along the GPS track
    distance_km: Option<f64>,
    #[clap(long, value_parser)]
    /// Path to vehicle file (yaml or json), defaults to a mid-size gasoline car
    veh_file: Option<String>,
    #[clap(long, value_parser, default_value = "physical")]
    /// Consumption model: `physical` or `statistical`
    model: String,
    #[clap(long, value_parser)]
    /// Consumption type of the physical model: `fuel` or `energy`
    consumption_type: Option<String>,
    #[clap(long, value_parser)]
    /// Rolling resistance coefficient, overrides road surfaces of the track
    rolling_coef: Option<f64>,
    #[clap(long, value_parser, default_value = "json")]
    /// How to return results: `json` or `yaml`
    res_fmt: String,
}

fn select_model(api: &EcoBalanceApi, veh: &Vehicle) -> anyhow::Result<ConsumptionModel> {
    let consumption_type = api
        .consumption_type
        .as_deref()
        .map(str::parse::<ConsumptionType>)
        .transpose()?;
    match api.model.trim().to_lowercase().as_str() {
        "physical" => {
            let consumption_type = match consumption_type {
                Some(consumption_type) => consumption_type,
                None if veh.is_electric() => {
                    log::warn!(
                        "{} vehicle has no calorific value, reporting energy consumption",
                        veh.fuel_type
                    );
                    ConsumptionType::Energy
                }
                None => ConsumptionType::default(),
            };
            Ok(ConsumptionModel::Physical(PhysicalModel::new(
                consumption_type,
                PhysicalProperties::default(),
            )))
        }
        "statistical" => {
            ensure!(
                consumption_type.unwrap_or_default() == ConsumptionType::Fuel,
                "the statistical model only estimates fuel consumption"
            );
            Ok(ConsumptionModel::Statistical(StatisticalModel::default()))
        }
        model => bail!("model {model:?} is unknown, must be one of [\"physical\", \"statistical\"]"),
    }
}

pub fn main() -> anyhow::Result<()> {
    env_logger::init();
    let api = EcoBalanceApi::parse();

    let veh = match &api.veh_file {
        Some(veh_file_path) => Vehicle::from_file(veh_file_path)
            .with_context(|| format!("could not load vehicle from {veh_file_path:?}"))?,
        None => Vehicle::default(),
    };

    let (samples, distance_km) = if let Some(track_file_path) = &api.track_file {
        let traj = Trajectory::from_file(track_file_path)
            .with_context(|| format!("could not load GPS track from {track_file_path:?}"))?;
        let (samples, track_distance_km) = SampleSeries::from_gps_points(&traj.points)?;
        (samples, api.distance_km.unwrap_or(track_distance_km))
    } else if let Some(samples_file_path) = &api.samples_file {
        let samples = SampleSeries::from_file(samples_file_path)
            .with_context(|| format!("could not load samples from {samples_file_path:?}"))?;
        let distance_km = api
            .distance_km
            .context("`--distance-km` is required with `--samples-file`")?;
        (samples, distance_km)
    } else {
        bail!("one of `--track-file` or `--samples-file` is required")
    };

    let rolling_coef = match api.rolling_coef {
        Some(rolling_coef) => ScalarOrArray::from(rolling_coef),
        None => samples.rolling_coef_or(&ScalarOrArray::from(DEFAULT_ROLLING_COEF)),
    };

    let mut model = select_model(&api, &veh)?;
    log::info!("{veh}");
    let consumption = model.calculate(&samples, &veh, &rolling_coef)?;
    let summary = TripSummary::new(
        &consumption,
        &samples.dt_s,
        distance_km,
        model.consumption_type(),
    )?;
    println!("{}", summary.to_str(&api.res_fmt)?);
    Ok(())
}
