use assert_cmd::Command;

fn repform() -> Command {
    let mut cmd = Command::cargo_bin("repform").unwrap();
    cmd.env_remove("REPFORM_EXERCISE")
        .env_remove("REPFORM_SIDE")
        .env_remove("REPFORM_MIN_CONFIDENCE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn runs() {
    repform().assert().success();
}

#[test]
fn outputs_tool_name() {
    let mut cmd = repform();
    cmd.arg("-V");
    cmd.assert()
        .success()
        .stdout(format!("repform {}\n", env!("CARGO_PKG_VERSION")));
}

// Analyze subcommand tests

#[test]
fn analyze_single_rep_text_report() {
    let mut cmd = repform();
    cmd.args(["analyze", "tests/fixtures/squat_one_rep.landmarks.json"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Reps detected: 1"))
        .stdout(predicates::str::contains("excellent depth"))
        .stdout(predicates::str::contains("Recommendations:"));
}

#[test]
fn analyze_single_rep_json_report() {
    let mut cmd = repform();
    cmd.args([
        "analyze",
        "tests/fixtures/squat_one_rep.landmarks.json",
        "--output",
        "json",
    ]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).expect("valid json");

    assert_eq!(report["exercise_detected"], "squat");
    assert_eq!(report["frames_analyzed"], 20);
    assert_eq!(report["reps_detected"], 1);
    assert_eq!(report["overall_score"], 100.0);
    assert_eq!(report["feedback_per_rep"][0]["rep"], 1);
    assert_eq!(report["feedback_per_rep"][0]["metrics"]["hip_angle"], 70.0);
    assert_eq!(report["summary"]["total_reps"], 1);
    assert_eq!(
        report["summary"]["recommendations"]
            .as_array()
            .map(|a| a.len()),
        Some(2)
    );
}

#[test]
fn analyze_csv_input_matches_json() {
    let mut cmd = repform();
    cmd.args([
        "analyze",
        "tests/fixtures/squat_one_rep.landmarks.csv",
        "--output",
        "json",
    ]);
    // The CSV fixture carries one extra trailing undetected frame
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("\"frames_analyzed\": 21"))
        .stdout(predicates::str::contains("\"reps_detected\": 1"))
        .stdout(predicates::str::contains("excellent depth"));
}

#[test]
fn analyze_no_reps_reports_placeholder() {
    let mut cmd = repform();
    cmd.args([
        "analyze",
        "tests/fixtures/squat_no_reps.landmarks.json",
        "--output",
        "json",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("\"reps_detected\": 0"))
        .stdout(predicates::str::contains("no reps detected"))
        .stdout(predicates::str::contains("\"overall_score\": 0.0"));
}

#[test]
fn analyze_plank_hold() {
    let mut cmd = repform();
    cmd.args([
        "analyze",
        "tests/fixtures/plank_hold.landmarks.json",
        "--exercise",
        "plank",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Exercise: plank"))
        .stdout(predicates::str::contains("Reps detected: 3"))
        .stdout(predicates::str::contains("great body alignment"));
}

#[test]
fn analyze_exercise_from_env() {
    let mut cmd = repform();
    cmd.env("REPFORM_EXERCISE", "plank");
    cmd.args(["analyze", "tests/fixtures/plank_hold.landmarks.json"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Exercise: plank"));
}

#[test]
fn analyze_right_side_finds_no_landmarks() {
    let mut cmd = repform();
    cmd.args([
        "analyze",
        "tests/fixtures/squat_one_rep.landmarks.json",
        "--side",
        "right",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Reps detected: 0"));
}

#[test]
fn analyze_writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.json");

    let mut cmd = repform();
    cmd.args(["analyze", "tests/fixtures/squat_one_rep.landmarks.json", "--report"])
        .arg(&report_path);
    cmd.assert().success();

    let written = std::fs::read_to_string(&report_path).unwrap();
    let report: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(report["reps_detected"], 1);
}

#[test]
fn analyze_unknown_exercise_fails() {
    let mut cmd = repform();
    cmd.args([
        "analyze",
        "tests/fixtures/squat_one_rep.landmarks.json",
        "--exercise",
        "burpee",
    ]);
    cmd.assert()
        .failure()
        .stdout(predicates::str::is_empty())
        .stderr(predicates::str::contains("Unknown exercise type"));
}

#[test]
fn analyze_unknown_exercise_rejected_before_reading_input() {
    let mut cmd = repform();
    cmd.args(["analyze", "nonexistent_file.json", "--exercise", "burpee"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Unknown exercise type"));
}

#[test]
fn analyze_nonexistent_file_fails() {
    let mut cmd = repform();
    cmd.args(["analyze", "nonexistent_file.json"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("IO error"));
}

#[test]
fn analyze_malformed_json_fails() {
    let mut cmd = repform();
    cmd.args(["analyze", "tests/fixtures/malformed.landmarks.json"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Failed to parse landmark JSON"));
}

#[test]
fn analyze_unsupported_format_fails() {
    let mut cmd = repform();
    cmd.args([
        "analyze",
        "tests/fixtures/squat_one_rep.landmarks.json",
        "--format",
        "not-a-format",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Unsupported format"));
}

#[test]
fn analyze_out_of_range_confidence_fails() {
    let mut cmd = repform();
    cmd.args([
        "analyze",
        "tests/fixtures/squat_one_rep.landmarks.json",
        "--min-confidence",
        "1.5",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Invalid option"));
}

#[test]
fn analyze_confidence_floor_above_fixture_scores_drops_everything() {
    let mut cmd = repform();
    cmd.args([
        "analyze",
        "tests/fixtures/squat_one_rep.landmarks.json",
        "--min-confidence",
        "0.99",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Reps detected: 0"));
}

// List exercises

#[test]
fn list_exercises_shows_registry() {
    let mut cmd = repform();
    cmd.arg("list-exercises");
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("squat"))
        .stdout(predicates::str::contains("down < 90°, up > 160°"))
        .stdout(predicates::str::contains("sampled every 30 frames"));
}
