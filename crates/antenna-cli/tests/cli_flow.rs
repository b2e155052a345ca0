//! End-to-end tests running the `antenna` binary against a fake state tree.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn antenna_binary() -> String {
    env!("CARGO_BIN_EXE_antenna").to_string()
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn message_line(ts: i64, cost: f64) -> String {
    format!(r#"{{"type":"message","message":{{"timestamp":{ts},"usage":{{"cost":{{"total":{cost}}}}}}}}}"#)
}

/// Writes a small state tree: one main session with a catalog entry,
/// one cron session named through the cron catalog, and one subagent.
fn write_state(root: &Path) {
    let sessions = root.join("agents").join("main").join("sessions");
    std::fs::create_dir_all(&sessions).unwrap();
    std::fs::create_dir_all(root.join("cron")).unwrap();

    let ts = now_ms() - 10 * 60 * 1000;
    std::fs::write(
        sessions.join("s-main.jsonl"),
        [
            r#"{"type":"session","version":3}"#.to_string(),
            message_line(ts, 0.5),
            message_line(ts + 1000, 0.25),
        ]
        .join("\n"),
    )
    .unwrap();
    std::fs::write(sessions.join("s-cron.jsonl"), message_line(ts, 0.125)).unwrap();
    std::fs::write(sessions.join("s-sub.jsonl"), "").unwrap();

    std::fs::write(
        sessions.join("sessions.json"),
        format!(
            r#"{{
                "agent:main:main": {{"sessionId":"s-main","updatedAt":{updated},"label":"Planning","model":"claude-opus"}},
                "agent:main:cron:JOB-1": {{"sessionId":"s-cron","updatedAt":1000}},
                "agent:main:subagent:x": {{"sessionId":"s-sub","updatedAt":500}}
            }}"#,
            updated = now_ms()
        ),
    )
    .unwrap();
    std::fs::write(
        root.join("cron").join("jobs.json"),
        r#"{"jobs":[{"id":"JOB-1","name":"Nightly Report"}]}"#,
    )
    .unwrap();
}

/// Runs antenna with an isolated home and `OPENCLAW_DIR` pointing at `root`.
fn run_antenna(home: &Path, root: &Path, args: &[&str]) -> Output {
    let output = Command::new(antenna_binary())
        .env("HOME", home)
        .env("OPENCLAW_DIR", root)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("ANTENNA_ROOT")
        .env_remove("ANTENNA_INTERVAL")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run antenna");
    assert!(
        output.status.success(),
        "antenna {args:?} should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_dashboard_json_reports_every_transcript() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("openclaw");
    write_state(&root);

    let output = run_antenna(temp.path(), &root, &["dashboard", "--json"]);
    let data = stdout_json(&output);

    assert_eq!(data["totalCount"], 3);
    let sessions = data["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 3);

    let main = sessions.iter().find(|s| s["sessionId"] == "s-main").unwrap();
    assert_eq!(main["name"], "Planning");
    assert_eq!(main["kind"], "main");
    assert_eq!(main["messageCount"], 2);
    assert_eq!(main["isActive"], true);

    let cron = sessions.iter().find(|s| s["sessionId"] == "s-cron").unwrap();
    assert_eq!(cron["name"], "Nightly Report");
    assert_eq!(cron["kind"], "cron");
    assert_eq!(cron["isActive"], false);

    let sub = sessions.iter().find(|s| s["sessionId"] == "s-sub").unwrap();
    assert_eq!(sub["kind"], "subagent");
    assert_eq!(sub["messageCount"], 0);

    // most recently updated first
    assert_eq!(sessions[0]["sessionId"], "s-main");
}

#[test]
fn test_dashboard_text_groups_sessions() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("openclaw");
    write_state(&root);

    let output = run_antenna(temp.path(), &root, &["dashboard"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.starts_with("ANTENNA: 3 sessions\n"));
    assert!(stdout.contains("ACTIVE (1)"));
    assert!(stdout.contains("CRON JOBS (1)"));
    assert!(stdout.contains("Nightly Report"));
}

#[test]
fn test_dashboard_on_missing_root_is_empty() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("nowhere");

    let output = run_antenna(temp.path(), &root, &["dashboard", "--json"]);
    let data = stdout_json(&output);

    assert_eq!(data["totalCount"], 0);
    assert_eq!(data["sessions"].as_array().unwrap().len(), 0);
    assert_eq!(data["totalCost"], 0.0);
}

#[test]
fn test_activity_json_has_24_buckets() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("openclaw");
    write_state(&root);

    let output = run_antenna(temp.path(), &root, &["activity", "--json"]);
    let buckets = stdout_json(&output);
    let buckets = buckets.as_array().unwrap();

    assert_eq!(buckets.len(), 24);
    let messages: u64 = buckets.iter().map(|b| b["messages"].as_u64().unwrap()).sum();
    let cost: f64 = buckets.iter().map(|b| b["cost"].as_f64().unwrap()).sum();
    assert_eq!(messages, 3);
    assert!((cost - 0.875).abs() < 1e-9);
    assert!(buckets.iter().all(|b| b["hour"].as_str().unwrap().ends_with(":00")));
}

#[test]
fn test_root_flag_overrides_environment() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("openclaw");
    write_state(&root);
    let elsewhere = temp.path().join("elsewhere");

    let output = run_antenna(
        temp.path(),
        &elsewhere,
        &["dashboard", "--json", "--root", root.to_str().unwrap()],
    );

    assert_eq!(stdout_json(&output)["totalCount"], 3);
}

#[test]
fn test_config_file_sets_root() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("openclaw");
    write_state(&root);
    let config_path = temp.path().join("antenna.toml");
    std::fs::write(&config_path, format!("root = {:?}\n", root.to_str().unwrap())).unwrap();

    let output = Command::new(antenna_binary())
        .env("HOME", temp.path())
        .env_remove("OPENCLAW_DIR")
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("ANTENNA_ROOT")
        .args(["--config", config_path.to_str().unwrap(), "dashboard", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout_json(&output)["totalCount"], 3);
}

#[test]
fn test_status_lists_state_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("openclaw");
    write_state(&root);

    let output = run_antenna(temp.path(), &root, &["status"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains(&format!("Root: {}", root.display())));
    assert!(stdout.contains("sessions.json (found)"));
    assert!(stdout.contains("jobs.json (found)"));
    assert!(stdout.contains("Transcripts: 3"));
}

#[test]
fn test_watch_with_count_exits() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("openclaw");
    write_state(&root);

    let output = run_antenna(temp.path(), &root, &["watch", "--count", "1", "-i", "0"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("ANTENNA: 3 sessions"));
    assert!(stdout.contains("ACTIVITY (last 24 hours)"));
}

#[test]
fn test_no_subcommand_prints_help() {
    let temp = TempDir::new().unwrap();

    let output = run_antenna(temp.path(), temp.path(), &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("dashboard"));
}
