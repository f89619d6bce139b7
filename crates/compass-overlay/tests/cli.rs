#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const CONFIG: &str = r#"{
    "viewport": {"width": 600, "height": 600},
    "topology": "rectangular",
    "facing_angle_deg": 90,
    "heatmap": {"N": 1.0, "Center": 0.5, "SW": 0.05}
}"#;

const SCRIPT: &str = r#"{
    "steps": [
        {"command": "drop_marker", "label": "Fire", "x": 300, "y": 300},
        {"type": "pointer_down", "x": 300, "y": 300},
        {"type": "pointer_move", "x": 400, "y": 300},
        {"type": "pointer_up", "x": 400, "y": 300},
        {"type": "wheel", "delta_y": 1, "modifier": true}
    ]
}"#;

fn bin() -> Command {
    Command::cargo_bin("compass-overlay").expect("binary built")
}

#[test]
fn render_prints_frame_json_by_default() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("config.json");
    fs::write(&config, CONFIG).expect("write config");

    let output = bin()
        .args(["render", "--config"])
        .arg(&config)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let frame: serde_json::Value = serde_json::from_slice(&output).expect("frame json");
    let layers = frame["layers"].as_array().expect("layers");
    let kinds: Vec<&str> = layers.iter().filter_map(|l| l["kind"].as_str()).collect();
    assert_eq!(
        kinds,
        vec!["background", "heatmap", "grid", "markers", "compass"]
    );
    // SW at 0.05 is below the cutoff
    assert_eq!(layers[1]["primitives"].as_array().map(Vec::len), Some(2));
}

#[test]
fn render_writes_svg_and_json_files() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("config.json");
    let script = dir.path().join("script.json");
    let svg = dir.path().join("frame.svg");
    let json = dir.path().join("frame.json");
    fs::write(&config, CONFIG).expect("write config");
    fs::write(&script, SCRIPT).expect("write script");

    bin()
        .args(["render", "--config"])
        .arg(&config)
        .arg("--events")
        .arg(&script)
        .arg("--svg")
        .arg(&svg)
        .arg("--json")
        .arg(&json)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let svg_text = fs::read_to_string(&svg).expect("svg written");
    assert!(svg_text.starts_with("<svg"));
    assert!(svg_text.contains(r#"<g id="compass">"#));
    assert!(svg_text.contains("Fire"));
    assert!(fs::read_to_string(&json)
        .expect("json written")
        .contains("\"kind\": \"arrow\""));
}

#[test]
fn markers_prints_versioned_payload() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("config.json");
    let script = dir.path().join("script.json");
    fs::write(&config, CONFIG).expect("write config");
    fs::write(&script, SCRIPT).expect("write script");

    let output = bin()
        .args(["markers", "--config"])
        .arg(&config)
        .arg("--events")
        .arg(&script)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let payload: serde_json::Value = serde_json::from_slice(&output).expect("payload json");
    assert_eq!(payload["version"], 1);
    let markers = payload["markers"].as_array().expect("markers");
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0]["label"], "Fire");
    let x = markers[0]["x"].as_f64().expect("x");
    assert!((x - 3.0).abs() < 1e-9, "x = {x}");
}

#[test]
fn markers_out_writes_payload_file() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("config.json");
    let script = dir.path().join("script.json");
    let out = dir.path().join("markers.json");
    fs::write(&config, CONFIG).expect("write config");
    fs::write(&script, SCRIPT).expect("write script");

    bin()
        .args(["markers", "--config"])
        .arg(&config)
        .arg("--events")
        .arg(&script)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let payload: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("payload written")).expect("json");
    assert_eq!(payload["version"], 1);
    assert_eq!(payload["markers"][0]["label"], "Fire");
}

#[test]
fn missing_config_fails_with_message() {
    let dir = tempdir().expect("tempdir");
    bin()
        .args(["render", "--config"])
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn invalid_heatmap_is_reported() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"heatmap": [[0, -1, 0], [0, 0, 0], [0, 0, 0]]}"#).expect("write");
    bin()
        .args(["render", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("negative"));
}
