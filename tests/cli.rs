use assert_cmd::Command;
use predicates::prelude::*;

fn yt_digest(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("yt-digest").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_summarize() {
    let home = tempfile::tempdir().unwrap();
    yt_digest(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("summarize"));
}

#[test]
fn invalid_reference_exits_with_failure_marker() {
    let home = tempfile::tempdir().unwrap();
    yt_digest(home.path())
        .args(["summarize", "https://vimeo.com/1234"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("❌ Error:"))
        .stderr(predicate::str::contains(
            "Could not extract video ID from: https://vimeo.com/1234",
        ));
}

#[test]
fn unknown_format_is_a_usage_error() {
    let home = tempfile::tempdir().unwrap();
    yt_digest(home.path())
        .args(["summarize", "dQw4w9WgXcQ", "--format", "pdf"])
        .assert()
        .code(2);
}

#[test]
fn missing_api_key_fails_before_writing() {
    let home = tempfile::tempdir().unwrap();
    yt_digest(home.path())
        .args(["summarize", "dQw4w9WgXcQ", "-f", "HTML"])
        .env_remove("OPENAI_API_KEY")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Missing API key: OPENAI_API_KEY environment variable is not set",
        ));

    let written: Vec<_> = std::fs::read_dir(home.path())
        .unwrap()
        .flatten()
        .filter(|entry| entry.path().is_file())
        .collect();
    assert!(written.is_empty());
}

#[test]
fn config_init_then_show() {
    let home = tempfile::tempdir().unwrap();
    yt_digest(home.path())
        .args(["config", "--init", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default configuration written to:"))
        .stdout(predicate::str::contains("Provider: OpenAI"))
        .stdout(predicate::str::contains("Default Format: markdown"));
}
