use std::f64::consts::FRAC_PI_2;
use std::fs;

use satellite_collision::config::{ConfigError, ScenarioConfig, load_scenario};
use satellite_collision::orbits::ArgumentError;
use satellite_collision::scenario::{Scenario, ScenarioError};

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write scenario");
    path
}

#[test]
fn yaml_scenario_accepts_short_field_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(
        &dir,
        "leo.yaml",
        "minor_axis: 6378.137\nmajor_axis: 6356.7523\nperiod: [90, 100, 120]\nmax_year: 3\ncollision_output: leo\n",
    );
    let config = load_scenario(&path).expect("yaml scenario");
    assert_eq!(config.minor_axis_km, Some(6378.137));
    assert_eq!(config.major_axis_km, Some(6356.7523));
    assert_eq!(config.periods_min, vec![90.0, 100.0, 120.0]);
    assert_eq!(config.max_years, Some(3));
    assert_eq!(config.output.as_deref(), Some("leo"));
    assert_eq!(config.start_points_rad, None);
}

#[test]
fn toml_scenario_is_selected_by_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(
        &dir,
        "pair.toml",
        r#"
name = "pair"
minor_axis_km = 7000.0
major_axis_km = 6900.0
periods_min = [60.0, 120.0]
start_points_rad = [4.71238898038469, 4.71238898038469]
epoch = "2030-01-01 00:00:00"
"#,
    );
    let config = load_scenario(&path).expect("toml scenario");
    assert_eq!(config.name.as_deref(), Some("pair"));
    assert_eq!(config.periods_min, vec![60.0, 120.0]);
    assert_eq!(config.epoch.as_deref(), Some("2030-01-01 00:00:00"));
}

#[test]
fn unknown_fields_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(&dir, "typo.yaml", "minor_axis: 1.0\neccentricity: 0.1\n");
    assert!(matches!(load_scenario(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.toml");
    assert!(matches!(load_scenario(&missing), Err(ConfigError::Io(_))));
}

#[test]
fn command_line_values_override_file_values() {
    let file = ScenarioConfig {
        minor_axis_km: Some(1.0),
        major_axis_km: Some(2.0),
        periods_min: vec![10.0, 20.0],
        max_years: Some(5),
        ..ScenarioConfig::default()
    };
    let flags = ScenarioConfig {
        major_axis_km: Some(3.0),
        periods_min: vec![30.0, 40.0, 50.0],
        ..ScenarioConfig::default()
    };
    let merged = file.merged_with(flags);
    assert_eq!(merged.minor_axis_km, Some(1.0));
    assert_eq!(merged.major_axis_km, Some(3.0));
    assert_eq!(merged.periods_min, vec![30.0, 40.0, 50.0]);
    assert_eq!(merged.max_years, Some(5));
}

fn base_config() -> ScenarioConfig {
    ScenarioConfig {
        minor_axis_km: Some(6378.137),
        major_axis_km: Some(6356.7523),
        periods_min: vec![90.0, 100.0, 120.0],
        ..ScenarioConfig::default()
    }
}

#[test]
fn scenario_applies_documented_defaults() {
    let scenario = Scenario::try_from(base_config()).expect("scenario");
    assert_eq!(scenario.model.satellite_count(), 3);
    assert_eq!(scenario.start_points, vec![FRAC_PI_2; 3]);
    assert_eq!(scenario.max_years, 2);
    assert!(scenario.epoch.is_none());
    assert_eq!(scenario.start_phase(3), Ok(FRAC_PI_2));
    assert_eq!(scenario.start_phase(4), Err(ArgumentError::IndexOutOfRange { index: 4, count: 3 }));
}

#[test]
fn scenario_requires_shape_and_periods() {
    let mut config = base_config();
    config.minor_axis_km = None;
    assert!(matches!(
        Scenario::try_from(config),
        Err(ScenarioError::Missing("minor axis"))
    ));

    let mut config = base_config();
    config.periods_min.clear();
    assert!(matches!(
        Scenario::try_from(config),
        Err(ScenarioError::Missing(_))
    ));

    let mut config = base_config();
    config.periods_min = vec![90.0, 0.0];
    assert!(matches!(
        Scenario::try_from(config),
        Err(ScenarioError::Model(_))
    ));
}

#[test]
fn scenario_validates_start_points_and_epoch() {
    let mut config = base_config();
    config.start_points_rad = Some(vec![0.0, 1.0]);
    assert!(matches!(
        Scenario::try_from(config),
        Err(ScenarioError::StartPoints(ArgumentError::PhaseCountMismatch {
            expected: 3,
            actual: 2
        }))
    ));

    let mut config = base_config();
    config.epoch = Some("next tuesday".to_string());
    assert!(matches!(
        Scenario::try_from(config),
        Err(ScenarioError::Epoch { .. })
    ));
}

#[test]
fn export_records_stamp_collision_epochs() {
    let mut config = base_config();
    config.epoch = Some("2030-01-01 00:00:00".to_string());
    let scenario = Scenario::try_from(config).expect("scenario");

    let table = scenario.collision_table().expect("table");
    let records = scenario.export_records(&table);
    assert_eq!(records.len(), 3);

    // 90 and 100 minute orbits meet 900 minutes (15 hours) after the epoch.
    let first = &records[0];
    assert_eq!((first.sat_a, first.sat_b), (1, 2));
    assert_eq!(first.time_min, Some(900.0));
    assert_eq!(first.epoch_utc.as_deref(), Some("2030-01-01 15:00:00"));
}

#[test]
fn export_records_leave_missing_pairs_empty() {
    let mut config = base_config();
    config.max_years = Some(0);
    let scenario = Scenario::try_from(config).expect("scenario");
    let records = scenario.export_records(&scenario.collision_table().unwrap());
    assert!(records.iter().all(|r| r.time_min.is_none() && r.x_km.is_none()));
}

