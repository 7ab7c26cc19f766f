use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lanternpost_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lanternpost").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

#[test]
fn lanternpost_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    lanternpost_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Festive greeting card renderer"));
}

#[test]
fn name_is_required() {
    let temp = TempDir::new().unwrap();
    lanternpost_cmd(&temp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("required arguments were not provided"));
}

#[test]
fn blank_name_is_rejected_without_writing() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("cards");
    lanternpost_cmd(&temp)
        .args(["--name", "   ", "--output"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a name"));
    assert!(!out.exists());
}

#[test]
fn writes_card_named_after_input() {
    let temp = TempDir::new().unwrap();
    lanternpost_cmd(&temp)
        .args(["--name", " Ahmed ", "--output"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ramadan_Ahmed.png"));

    let bytes = std::fs::read(temp.path().join("Ramadan_Ahmed.png")).unwrap();
    assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
}

#[test]
fn config_file_sets_output_and_size() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("from-config");
    let config_path = temp.path().join("card.toml");
    std::fs::write(
        &config_path,
        format!(
            "[canvas]\nwidth = 300\nheight = 500\n\n[export]\noutput_dir = {:?}\n",
            out.to_string_lossy()
        ),
    )
    .unwrap();

    lanternpost_cmd(&temp)
        .args(["--name", "Sara", "--config"])
        .arg(&config_path)
        .assert()
        .success();
    assert!(out.join("Ramadan_Sara.png").exists());
}

#[test]
fn share_prints_fallback_link() {
    let temp = TempDir::new().unwrap();
    lanternpost_cmd(&temp)
        .args(["--name", "Ahmed", "--share", "--print-link", "--output"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("https://wa.me/?text="))
        .stdout(predicate::str::contains("Ahmed"))
        .stdout(predicate::str::contains("i3j.io"));
}

#[test]
fn print_link_requires_share() {
    let temp = TempDir::new().unwrap();
    lanternpost_cmd(&temp)
        .args(["--name", "Ahmed", "--print-link"])
        .assert()
        .failure();
}
