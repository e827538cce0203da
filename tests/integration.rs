use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn tooldex_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tooldex"))
}

fn fixture_catalog() -> String {
    fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tools.json"))
        .unwrap()
}

/// Write a config and catalog into a temp dir. `votes_file` switches the
/// vote backend to a JSON file inside the same dir.
fn setup_test_env(votes_file: bool) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("tools.json"), fixture_catalog()).unwrap();

    let votes_section = if votes_file {
        format!(
            "[votes]\nbackend = \"file\"\npath = \"{}/data/votes.json\"\n",
            root.display()
        )
    } else {
        String::new()
    };

    let config_content = format!(
        r#"[catalog]
path = "{}/data/tools.json"

{}
[ranking]
featured_count = 5
related_limit = 2

[logging]
level = "warn"
"#,
        root.display(),
        votes_section
    );

    let config_path = config_dir.join("tooldex.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_tooldex(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = tooldex_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run tooldex binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Assert that `slugs` appear in `stdout` in this order.
fn assert_order(stdout: &str, slugs: &[&str]) {
    let positions: Vec<usize> = slugs
        .iter()
        .map(|s| {
            stdout
                .find(s)
                .unwrap_or_else(|| panic!("'{}' missing from output:\n{}", s, stdout))
        })
        .collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "expected order {:?}, got:\n{}",
        slugs,
        stdout
    );
}

#[test]
fn test_check_reports_rejections() {
    let (_tmp, config_path) = setup_test_env(false);

    let (stdout, stderr, success) = run_tooldex(&config_path, &["check"]);
    assert!(!success, "check should fail with a rejected record: {}", stderr);
    assert!(stdout.contains("accepted:  5"), "got: {}", stdout);
    assert!(stdout.contains("rejected:  1"));
    assert!(stdout.contains("no-tags"));
    assert!(stdout.contains("has no tags"));
    assert!(stdout.contains("colab-notes"), "undated warning missing: {}", stdout);
    assert!(stdout.contains("FAILED"));
}

#[test]
fn test_list_default_is_popularity() {
    let (_tmp, config_path) = setup_test_env(false);

    let (stdout, stderr, success) = run_tooldex(&config_path, &["list"]);
    assert!(success, "list failed: {}", stderr);
    assert_order(
        &stdout,
        &["code-pilot", "pixel-dream", "story-weaver", "open-coder", "colab-notes"],
    );
    assert!(!stdout.contains("no-tags"));
    assert!(stdout.contains("5 of 5 matching tools"));
}

#[test]
fn test_list_sort_votes_breaks_ties_on_slug() {
    let (_tmp, config_path) = setup_test_env(false);

    let (stdout, _, success) = run_tooldex(&config_path, &["list", "--sort", "votes"]);
    assert!(success);
    assert_order(
        &stdout,
        &["code-pilot", "open-coder", "colab-notes", "story-weaver", "pixel-dream"],
    );
}

#[test]
fn test_list_search_query() {
    let (_tmp, config_path) = setup_test_env(false);

    let (stdout, _, success) = run_tooldex(&config_path, &["list", "gpt"]);
    assert!(success);
    assert_order(&stdout, &["code-pilot", "story-weaver"]);
    assert!(!stdout.contains("open-coder"));
    assert!(stdout.contains("2 of 2 matching tools"));
}

#[test]
fn test_list_filters_compose() {
    let (_tmp, config_path) = setup_test_env(false);

    let (stdout, _, success) = run_tooldex(
        &config_path,
        &["list", "--tag", "Coding", "--min-score", "5", "--sort", "name-asc"],
    );
    assert!(success);
    // colab-notes was clamped from 7 to 5 at ingestion.
    assert_order(&stdout, &["colab-notes", "open-coder"]);
    assert!(!stdout.contains("code-pilot"));

    let (stdout, _, success) = run_tooldex(&config_path, &["list", "--pricing", "open-source"]);
    assert!(success);
    assert!(stdout.contains("open-coder"));
    assert!(stdout.contains("1 of 1 matching tools"));
}

#[test]
fn test_list_no_results() {
    let (_tmp, config_path) = setup_test_env(false);

    let (stdout, _, success) = run_tooldex(&config_path, &["list", "spreadsheet"]);
    assert!(success);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_list_rejects_bad_arguments() {
    let (_tmp, config_path) = setup_test_env(false);

    let (_, _, success) = run_tooldex(&config_path, &["list", "--sort", "random"]);
    assert!(!success);
    let (_, _, success) = run_tooldex(&config_path, &["list", "--min-score", "9"]);
    assert!(!success);
}

#[test]
fn test_featured_strict_and_spillover() {
    let (_tmp, config_path) = setup_test_env(false);

    let (stdout, _, success) = run_tooldex(&config_path, &["featured"]);
    assert!(success);
    assert_order(&stdout, &["code-pilot", "story-weaver", "open-coder", "colab-notes"]);
    assert!(!stdout.contains("pixel-dream"), "strict should under-fill: {}", stdout);

    let (stdout, _, success) =
        run_tooldex(&config_path, &["featured", "--policy", "spillover"]);
    assert!(success);
    assert!(stdout.contains("pixel-dream"));
}

#[test]
fn test_related_scores() {
    let (_tmp, config_path) = setup_test_env(false);

    let (stdout, _, success) = run_tooldex(&config_path, &["related", "code-pilot"]);
    assert!(success);
    assert_order(&stdout, &["open-coder", "colab-notes"]);
    assert!(stdout.contains("11"));
    assert!(!stdout.contains("story-weaver"), "limit 2 exceeded: {}", stdout);
}

#[test]
fn test_show_and_unknown_slug() {
    let (_tmp, config_path) = setup_test_env(false);

    let (stdout, _, success) = run_tooldex(&config_path, &["show", "code-pilot"]);
    assert!(success);
    assert!(stdout.contains("Code Pilot"));
    assert!(stdout.contains("net 10"));
    assert!(stdout.contains("Refactor"));

    let (_, stderr, success) = run_tooldex(&config_path, &["show", "missing-tool"]);
    assert!(!success);
    assert!(stderr.contains("tool not found"), "got: {}", stderr);
}

#[test]
fn test_vote_toggle_persists_with_file_backend() {
    let (tmp, config_path) = setup_test_env(true);

    let (stdout, stderr, success) =
        run_tooldex(&config_path, &["vote", "code-pilot", "up", "--viewer", "alice"]);
    assert!(success, "vote failed: {}", stderr);
    assert!(stdout.contains("voted up (+13 / -2, net 11)"), "got: {}", stdout);
    assert!(tmp.path().join("data/votes.json").exists());

    // A new process sees the persisted vote.
    let (stdout, _, _) = run_tooldex(&config_path, &["show", "code-pilot", "--viewer", "alice"]);
    assert!(stdout.contains("you voted up"), "got: {}", stdout);

    // Same direction again clears it.
    let (stdout, _, success) =
        run_tooldex(&config_path, &["vote", "code-pilot", "up", "--viewer", "alice"]);
    assert!(success);
    assert!(stdout.contains("vote cleared (+12 / -2, net 10)"), "got: {}", stdout);
}

#[test]
fn test_vote_unknown_slug_fails() {
    let (_tmp, config_path) = setup_test_env(true);

    let (_, stderr, success) =
        run_tooldex(&config_path, &["vote", "missing-tool", "down", "--viewer", "bob"]);
    assert!(!success);
    assert!(stderr.contains("tool not found"));
}

#[test]
fn test_completions_need_no_config() {
    let output = Command::new(tooldex_binary())
        .args(["--config", "/nonexistent/tooldex.toml", "completions", "bash"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("tooldex"));
}

#[test]
fn test_missing_config_fails() {
    let (_, stderr, success) = run_tooldex(Path::new("/nonexistent/tooldex.toml"), &["list"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}
