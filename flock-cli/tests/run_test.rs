use flock_cli::{load_parameters, run, RunConfig};
use flock_core::{Bounds, RuleParameters, Vector2D};
use std::fs;
use std::io::Write;

fn base_config() -> RunConfig {
    RunConfig {
        agents: 40,
        bounds: Bounds::new(640.0, 480.0),
        params: RuleParameters::default(),
        steps: 50,
        pointer: None,
        report_every: 0,
        snapshot: None,
    }
}

#[test]
fn test_partial_config_keeps_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "maxSpeed": 0.3, "visualRange": 80, "smoothSpeed": 0.1 }}"#).unwrap();

    let params = load_parameters(file.path()).unwrap();

    assert_eq!(params.max_speed, 0.3);
    assert_eq!(params.visual_range, 80.0);
    assert_eq!(params.smooth_speed, Some(0.1));
    assert_eq!(params.min_distance_mouse, 100.0);
    assert_eq!(params.avoid_factor_boid, 0.05);
}

#[test]
fn test_malformed_config_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert!(load_parameters(file.path()).is_err());
}

#[test]
fn test_missing_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_parameters(&dir.path().join("absent.json")).is_err());
}

#[test]
fn test_run_keeps_speeds_in_range() {
    let config = base_config();
    let stats = run(&config).unwrap();

    assert_eq!(stats.agents, 40);
    assert!(stats.max_speed <= config.params.max_speed * 1.0001);
    assert!(stats.min_speed >= config.params.max_speed * 0.5 * 0.9999);
    assert!(stats.polarization >= 0.0 && stats.polarization <= 1.0001);
}

#[test]
fn test_run_with_pointer_and_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    let config = RunConfig {
        pointer: Some(Vector2D::new(320.0, 240.0)),
        snapshot: Some(path.clone()),
        report_every: 10,
        ..base_config()
    };
    run(&config).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["step"], 50);
    assert_eq!(json["agents"].as_array().unwrap().len(), 40);
    assert_eq!(json["repulsor"]["x"], 320.0);
    assert_eq!(json["parameters"]["maxSpeed"].as_f64().unwrap() as f32, 0.45);
    assert!(json["agents"][0]["heading"].is_number());
}

#[test]
fn test_invalid_parameters_fail_the_run() {
    let config = RunConfig {
        params: RuleParameters {
            max_speed: 0.0,
            ..Default::default()
        },
        ..base_config()
    };
    let err = run(&config).unwrap_err();
    assert!(format!("{:#}", err).contains("max_speed"));
}

#[test]
fn test_empty_flock_runs() {
    let config = RunConfig {
        agents: 0,
        ..base_config()
    };
    let stats = run(&config).unwrap();
    assert_eq!(stats.agents, 0);
}
