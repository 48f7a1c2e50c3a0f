use std::f64::consts::{FRAC_PI_2, PI};

use satellite_collision::orbits::{
    ArgumentError, ConfigurationError, OrbitModel, StartPhases, satellite_index,
};
use satellite_collision::primitives::time::linspace;

const MINOR_KM: f64 = 6378.137;
const MAJOR_KM: f64 = 6356.7523;

fn earth_pair() -> OrbitModel {
    OrbitModel::new(MINOR_KM, MAJOR_KM, vec![90.0, 100.0], 2).expect("valid model")
}

#[test]
fn construction_rejects_count_mismatch() {
    let err = OrbitModel::new(MINOR_KM, MAJOR_KM, vec![90.0, 100.0], 3).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::CountMismatch {
            count: 3,
            periods: 2
        }
    );
}

#[test]
fn construction_rejects_bad_axes_and_periods() {
    assert!(matches!(
        OrbitModel::from_periods(0.0, MAJOR_KM, vec![90.0]),
        Err(ConfigurationError::InvalidAxis {
            name: "minor_axis",
            ..
        })
    ));
    assert!(matches!(
        OrbitModel::from_periods(MINOR_KM, f64::NAN, vec![90.0]),
        Err(ConfigurationError::InvalidAxis {
            name: "major_axis",
            ..
        })
    ));
    assert_eq!(
        OrbitModel::from_periods(MINOR_KM, MAJOR_KM, vec![]),
        Err(ConfigurationError::NoPeriods)
    );
    assert_eq!(
        OrbitModel::from_periods(MINOR_KM, MAJOR_KM, vec![90.0, -5.0]),
        Err(ConfigurationError::InvalidPeriod {
            index: 2,
            value: -5.0
        })
    );
}

#[test]
fn position_at_epoch_sits_on_the_north_pole() {
    let model = earth_pair();

    let first = model.position(1, 0.0, FRAC_PI_2).unwrap();
    assert!(first.x.abs() < 1e-9, "x = {}", first.x);
    assert_eq!(first.y, MAJOR_KM);
    assert_eq!(first.plane_offset_deg, 0.0);

    let second = model.position(2, 0.0, FRAC_PI_2).unwrap();
    assert!(second.x.abs() < 1e-9, "x = {}", second.x);
    assert_eq!(second.y, MAJOR_KM);
    assert_eq!(second.plane_offset_deg, 180.0);
}

#[test]
fn position_after_quarter_period_reaches_the_minor_axis() {
    let model = earth_pair();
    // 90-minute period: a quarter turn takes 22.5 minutes.
    let p = model.position(1, 22.5 * 60.0, FRAC_PI_2).unwrap();
    assert!((p.x + MINOR_KM).abs() < 1e-6, "x = {}", p.x);
    assert!(p.y.abs() < 1e-6, "y = {}", p.y);
}

#[test]
fn position_rejects_out_of_range_indices() {
    let model = earth_pair();
    assert_eq!(
        model.position(0, 0.0, FRAC_PI_2),
        Err(ArgumentError::IndexBelowOne)
    );
    assert_eq!(
        model.position(3, 0.0, FRAC_PI_2),
        Err(ArgumentError::IndexOutOfRange { index: 3, count: 2 })
    );
}

#[test]
fn satellite_index_rejects_fractional_values() {
    assert_eq!(satellite_index(2.0), Ok(2));
    assert_eq!(satellite_index(1.5), Err(ArgumentError::FractionalIndex(1.5)));
    assert_eq!(satellite_index(0.0), Err(ArgumentError::IndexBelowOne));
    assert!(satellite_index(f64::NAN).is_err());
}

#[test]
fn trajectory_matches_pointwise_positions() {
    let model = earth_pair();
    let times = linspace(0.0, 90.0 * 60.0, 50);
    let trajectory = model.trajectory(2, &times, 0.3).unwrap();

    assert_eq!(trajectory.len(), times.len());
    assert_eq!(trajectory.plane_offset_deg, 180.0);
    for (i, &t) in times.iter().enumerate() {
        let p = model.position(2, t, 0.3).unwrap();
        assert_eq!(trajectory.x[i], p.x);
        assert_eq!(trajectory.y[i], p.y);
    }
}

#[test]
fn trajectory_over_one_period_closes_the_loop() {
    let model = earth_pair();
    let times = linspace(0.0, 90.0 * 60.0, 50);
    let trajectory = model.trajectory(1, &times, FRAC_PI_2).unwrap();
    let first = (trajectory.x[0], trajectory.y[0]);
    let last = (trajectory.x[49], trajectory.y[49]);
    assert!((first.0 - last.0).abs() < 1e-6);
    assert!((first.1 - last.1).abs() < 1e-6);
}

#[test]
fn angle_is_wrapped_into_a_full_turn() {
    let model =
        OrbitModel::from_periods(MINOR_KM, MAJOR_KM, vec![90.0, 100.0, 120.0, 70.0, 80.0, 60.0])
            .unwrap();
    for &t in &[-1.0e6, -3_600.0, 0.0, 1.0, 3_600.0, 5.4e4, 1.0e7] {
        let angles = model.angle(t, StartPhases::default()).unwrap();
        assert_eq!(angles.len(), 6);
        for a in angles {
            assert!((0.0..360.0).contains(&a), "angle {a} at t = {t}");
        }
    }
}

#[test]
fn angle_at_one_hour_matches_hand_computation() {
    let model = OrbitModel::from_periods(MINOR_KM, MAJOR_KM, vec![60.0, 120.0]).unwrap();
    let angles = model.angle(3_600.0, StartPhases::default()).unwrap();
    // One full turn and a half turn after starting at 90°.
    assert!((angles[0] - 90.0).abs() < 1e-9, "{angles:?}");
    assert!((angles[1] - 270.0).abs() < 1e-9, "{angles:?}");
}

#[test]
fn angle_accepts_per_satellite_phases() {
    let model = earth_pair();
    let angles = model
        .angle(0.0, StartPhases::PerSatellite(&[0.0, PI]))
        .unwrap();
    assert!(angles[0].abs() < 1e-12);
    assert!((angles[1] - 180.0).abs() < 1e-9);

    assert_eq!(
        model.angle(0.0, StartPhases::PerSatellite(&[0.0])),
        Err(ArgumentError::PhaseCountMismatch {
            expected: 2,
            actual: 1
        })
    );
}
