use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gym_console(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gym-console").unwrap();
    cmd.env("GYM_CONSOLE_DATA_DIR", home.path().join("session.db"))
        .env("GYM_CONSOLE_CONFIG", home.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_command() {
    let home = TempDir::new().unwrap();
    gym_console(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("gym management"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("sessions"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn test_version_command() {
    let home = TempDir::new().unwrap();
    gym_console(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let home = TempDir::new().unwrap();
    gym_console(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_gym-console"));
}

#[test]
fn test_config_init_then_path_and_show() {
    let home = TempDir::new().unwrap();
    let config_file = home.path().join("config.toml");

    gym_console(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration initialized"));
    assert!(config_file.exists());

    gym_console(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config_file.to_string_lossy().as_ref()));

    gym_console(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8000/api"));
}

#[test]
fn test_whoami_when_logged_out() {
    let home = TempDir::new().unwrap();
    gym_console(&home)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("You are not logged in."));
}

#[test]
fn test_resource_pages_require_login() {
    let home = TempDir::new().unwrap();
    gym_console(&home)
        .args(["members", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_invalid_subcommand() {
    let home = TempDir::new().unwrap();
    gym_console(&home)
        .args(["machines", "explode"])
        .assert()
        .failure();
}
