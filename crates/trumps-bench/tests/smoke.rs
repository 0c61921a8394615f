use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;
use trumps_bench::config::SimulationConfig;
use trumps_bench::simulation::SimulationRunner;

fn config_yaml(output_dir: &Path, games: usize, threads: usize) -> String {
    format!(
        r#"
run_id: "smoke"
games:
  count: {games}
  seed: 4242
  threads: {threads}
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("{run_id}/games.jsonl").display(),
        summary = output_dir.join("{run_id}/summary.md").display(),
    )
}

fn load_config(output_dir: &Path, games: usize, threads: usize) -> SimulationConfig {
    let mut cfg: SimulationConfig =
        serde_yaml::from_str(&config_yaml(output_dir, games, threads)).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn run_to_strings(games: usize, threads: usize) -> (String, String) {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), games, threads);
    let outputs = config.resolved_outputs();
    let runner = SimulationRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("simulation completes");

    assert_eq!(summary.games_played, games);
    assert_eq!(summary.rows_written, games);
    assert_eq!(summary.summary.games, games as u64);

    let jsonl_path = summary.jsonl_path.expect("jsonl configured");
    assert!(jsonl_path.ends_with("smoke/games.jsonl"));
    let jsonl = fs::read_to_string(&jsonl_path).expect("jsonl readable");
    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    (jsonl, markdown)
}

#[test]
fn output_is_identical_across_thread_counts() {
    let (jsonl_one, md_one) = run_to_strings(1_100, 1);
    let (jsonl_many, md_many) = run_to_strings(1_100, 3);
    assert_eq!(jsonl_one, jsonl_many);
    assert_eq!(md_one, md_many);
}

#[test]
fn rows_describe_finished_games_in_order() {
    let (jsonl, markdown) = run_to_strings(40, 2);
    let rows: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect();
    assert_eq!(rows.len(), 40);

    for (index, row) in rows.iter().enumerate() {
        assert_eq!(row["game_index"].as_u64(), Some(index as u64));
        let score: Vec<u64> = row["score"]
            .as_array()
            .expect("score array")
            .iter()
            .map(|v| v.as_u64().expect("score"))
            .collect();
        let winner = match row["winning_team"].as_str() {
            Some("NorthSouth") => 0,
            Some("EastWest") => 1,
            other => panic!("unexpected team {other:?}"),
        };
        assert_eq!(score[winner], 7);
        assert!(score[1 - winner] < 7);
        assert_eq!(row["tricks"].as_u64(), Some(score[0] + score[1]));
        assert_eq!(row["signatures"].as_array().map(Vec::len), Some(4));
    }

    assert!(markdown.starts_with("# Simulation Summary: smoke"));
    assert!(markdown.contains("## Starting-hand features"));
}

#[test]
fn cli_validate_only_skips_the_run() {
    let dir = tempdir().expect("temp dir");
    let config_path = dir.path().join("sim.yaml");
    let yaml = config_yaml(dir.path(), 5, 1)
        .replace("enable_structured: false", "enable_structured: true");
    fs::write(&config_path, yaml).expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_trumps-bench"))
        .arg("--config")
        .arg(&config_path)
        .arg("--validate-only")
        .output()
        .expect("binary runs");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Loaded configuration 'smoke'"));
    assert!(stdout.contains("Validation-only mode"));
    // Nothing is written, not even the trace file.
    assert!(!dir.path().join("smoke").exists());
}

#[test]
fn cli_rejects_bad_overrides() {
    let dir = tempdir().expect("temp dir");
    let config_path = dir.path().join("sim.yaml");
    fs::write(&config_path, config_yaml(dir.path(), 5, 1)).expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_trumps-bench"))
        .arg("--config")
        .arg(&config_path)
        .args(["--win-score", "8"])
        .output()
        .expect("binary runs");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("games.win_score"));
}

#[test]
fn cli_runs_a_small_simulation() {
    let dir = tempdir().expect("temp dir");
    let config_path = dir.path().join("sim.yaml");
    fs::write(&config_path, config_yaml(dir.path(), 5, 1)).expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_trumps-bench"))
        .arg("--config")
        .arg(&config_path)
        .args(["--games", "12", "--run-id", "cli_run", "--threads", "2"])
        .output()
        .expect("binary runs");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let jsonl = fs::read_to_string(dir.path().join("cli_run").join("games.jsonl")).expect("jsonl");
    assert_eq!(jsonl.lines().count(), 12);
    assert!(dir.path().join("cli_run").join("summary.md").exists());
}
