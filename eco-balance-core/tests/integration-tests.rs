use std::path::{Path, PathBuf};

use eco_balance_core::params::DEFAULT_ROLLING_COEF;
use eco_balance_core::prelude::*;
use ndarray::Array1;

const GASOLINE_CAR: &str = include_str!("assets/gasoline_car.yaml");

fn asset(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("assets")
        .join(name)
}

fn trip() -> (SampleSeries, f64) {
    let traj = Trajectory::from_file(asset("muenster_trip.csv")).unwrap();
    SampleSeries::from_gps_points(&traj.points).unwrap()
}

#[test]
fn test_gps_to_fuel_summary() {
    let (samples, distance_km) = trip();
    assert_eq!(samples.len(), 11);
    assert!(distance_km > 0.4 && distance_km < 0.8, "{distance_km}");

    let veh = Vehicle::from_yaml(GASOLINE_CAR).unwrap();
    let mut model = ConsumptionModel::default();
    let rolling_coef = samples.rolling_coef_or(&ScalarOrArray::from(DEFAULT_ROLLING_COEF));
    assert!(matches!(rolling_coef, ScalarOrArray::Array(_)));
    let consumption = model.calculate(&samples, &veh, &rolling_coef).unwrap();
    assert_eq!(consumption.len(), samples.len());
    assert!(consumption.iter().all(|c| *c > 0.0));

    let summary = TripSummary::new(
        &consumption,
        &samples.dt_s,
        distance_km,
        model.consumption_type(),
    )
    .unwrap();
    assert_eq!(summary.duration_s, 50.0);
    assert_eq!(summary.total_unit, "l");
    assert!(summary.total > 0.0);
    assert!(summary.per_100km > 1.0 && summary.per_100km < 50.0, "{summary}");
    assert_eq!(
        summary.per_100km,
        consumption_per_100km(&consumption, &samples.dt_s, distance_km).unwrap()
    );
}

#[test]
fn test_gps_to_electric_energy() {
    let (samples, distance_km) = trip();
    let veh = Vehicle::from_file(asset("electric_car.yaml")).unwrap();
    let mut model = ConsumptionModel::Physical(PhysicalModel::new(
        ConsumptionType::Energy,
        PhysicalProperties::default(),
    ));
    let consumption = model
        .calculate(&samples, &veh, &ScalarOrArray::from(DEFAULT_ROLLING_COEF))
        .unwrap();
    // braking recovers energy
    assert!(consumption.iter().any(|c| *c < 0.0));
    let summary =
        TripSummary::new(&consumption, &samples.dt_s, distance_km, ConsumptionType::Energy)
            .unwrap();
    assert!(summary.total > 0.0);
    assert_eq!(summary.per_100km_unit, "kWh/100km");

    let mut fuel_model = ConsumptionModel::default();
    assert!(fuel_model
        .calculate(&samples, &veh, &ScalarOrArray::from(DEFAULT_ROLLING_COEF))
        .is_err());
}

#[test]
fn test_statistical_model_never_below_idle() {
    let (samples, _) = trip();
    let mut model = ConsumptionModel::Statistical(StatisticalModel::default());
    let consumption = model
        .calculate(&samples, &Vehicle::default(), &ScalarOrArray::from(0.0))
        .unwrap();
    assert!(consumption.iter().all(|c| *c >= 1.5));
}

#[test]
fn test_aggregation_properties() {
    let (samples, distance_km) = trip();
    let mut model = ConsumptionModel::default();
    let consumption = model
        .calculate(&samples, &Vehicle::default(), &ScalarOrArray::from(DEFAULT_ROLLING_COEF))
        .unwrap();
    let total = accumulate_consumption(&consumption, &samples.dt_s).unwrap();
    let k = 3.0;
    let scaled = accumulate_consumption(&(&consumption * k), &samples.dt_s).unwrap();
    assert!(scaled.approx_eq(&(k * total), 1e-12));
    assert_eq!(
        consumption_per_100km(&consumption, &samples.dt_s, distance_km).unwrap(),
        100.0 * total / distance_km
    );
}

#[test]
fn test_one_hour_at_ten_kw() {
    let consumption = Array1::from_elem(1, 10.0);
    let total = accumulate_consumption(&consumption, &Array1::from_elem(1, 3_600.0)).unwrap();
    assert_eq!(total, 10.0);
}

#[test]
fn test_samples_file_round_trips() {
    let (samples, _) = trip();
    let tmpdir = tempfile::tempdir().unwrap();
    for format in ["csv", "yaml", "json", "bin"] {
        let path = tmpdir.path().join(format!("samples.{format}"));
        samples.to_file(&path).unwrap();
        let read = SampleSeries::from_file(&path).unwrap();
        assert_eq!(read, samples, "round trip through {format} changed the samples");
    }
}

#[test]
fn test_config_file_round_trips() {
    let tmpdir = tempfile::tempdir().unwrap();

    let veh = Vehicle::from_yaml(GASOLINE_CAR).unwrap();
    let veh_path = tmpdir.path().join("veh.json");
    veh.to_file(&veh_path).unwrap();
    assert_eq!(Vehicle::from_file(&veh_path).unwrap(), veh);

    let model = ConsumptionModel::Statistical(StatisticalModel::raised_constant());
    let model_path = tmpdir.path().join("model.yaml");
    model.to_file(&model_path).unwrap();
    assert_eq!(ConsumptionModel::from_file(&model_path).unwrap(), model);

    assert!(Vehicle::from_file(tmpdir.path().join("veh.toml")).is_err());
}
