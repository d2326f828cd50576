use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_dryfire")
}

fn unique_temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("dryfire-{name}-{stamp}.csv"))
}

#[test]
fn missing_command_returns_usage() {
    let output = Command::new(bin()).output().expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: dryfire"));
}

#[test]
fn simulate_blaster_emits_the_full_cycle_as_json() {
    let output = Command::new(bin())
        .args(["simulate", "blaster"])
        .output()
        .expect("simulate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("simulate should emit json");
    assert_eq!(payload["total_damage"], 1350.0);
    assert!(payload["timeline"].as_array().is_some_and(|t| !t.is_empty()));
}

#[test]
fn simulate_rifle_honors_toggle_flags() {
    let output = Command::new(bin())
        .args(["simulate", "rifle", "0", "0", "--serum", "--no-rocket"])
        .output()
        .expect("simulate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("simulate should emit json");
    // Two serum magazines, no rocket cast.
    assert_eq!(payload["burst"]["ability_damage"], 0.0);
    let fire_count = payload["timeline"]
        .as_array()
        .expect("timeline should be an array")
        .iter()
        .filter(|event| event["kind"] == "fire")
        .count();
    assert_eq!(fire_count, 60);
}

#[test]
fn simulate_with_table_flag_emits_a_summary_row() {
    let output = Command::new(bin())
        .args(["simulate", "blaster", "100", "100", "--table"])
        .output()
        .expect("simulate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("duration_s\ttotal_damage"));
    assert!(stdout.contains("13.0500"));
}

#[test]
fn simulate_without_weapon_returns_usage() {
    let output = Command::new(bin())
        .arg("simulate")
        .output()
        .expect("simulate should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: dryfire simulate"));
}

#[test]
fn export_writes_a_timeline_csv() {
    let path = unique_temp_path("export");

    let output = Command::new(bin())
        .args(["export", "rifle", path.to_string_lossy().as_ref()])
        .output()
        .expect("export should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("export complete"));

    let contents = fs::read_to_string(&path).expect("csv should be written");
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("kind,start_seconds,duration_seconds,sequence_index,damage,cumulative_damage")
    );
    assert!(contents.lines().count() > 30);

    let _ = fs::remove_file(path);
}

#[test]
fn sweep_emits_the_ranked_grid() {
    let output = Command::new(bin())
        .arg("sweep")
        .output()
        .expect("sweep should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("sweep should emit json");
    assert_eq!(payload["grid"].as_array().map(Vec::len), Some(441));
}
