use assert_cmd::Command;
use predicates::prelude::*;

fn wallpaper() -> Command {
    let mut cmd = Command::cargo_bin("wallpaper").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version() {
    wallpaper()
        .arg("--version")
        .assert()
        .success()
        .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")))
        .stderr("");
}

#[test]
fn test_version_ignores_trailing_arguments() {
    wallpaper()
        .args(["--version", "whatever", "--scale"])
        .assert()
        .success()
        .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help() {
    let mut assert = wallpaper().arg("--help").assert().success();
    for style in [
        "center",
        "tile",
        "stretch",
        "span",
        "max",
        "crop-to-fit",
        "keep-aspect-ratio",
    ] {
        assert = assert.stdout(predicate::str::contains(style));
    }
    assert
        .stdout(predicate::str::contains("Manage the desktop wallpaper"))
        .stdout(predicate::str::contains("Usage: wallpaper [file]"))
        .stdout(predicate::str::contains("Created by Sindre Sorhus"));
}

#[test]
fn test_unexpected_trailing_argument() {
    wallpaper()
        .args(["unicorn.jpg", "--stretch"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with("Invalid arguments: "));
}

#[test]
fn test_scale_without_style() {
    wallpaper()
        .args(["unicorn.jpg", "--scale"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Invalid arguments: "));
}

#[test]
fn test_empty_path() {
    wallpaper()
        .arg("")
        .assert()
        .code(1)
        .stderr("Invalid path\n");
}

#[test]
fn test_overlong_path() {
    wallpaper()
        .arg("a".repeat(wallpaper::path::MAX_PATH))
        .assert()
        .code(1)
        .stderr("Invalid path\n");
}

#[test]
fn test_late_help_and_version_are_rejected() {
    for flag in ["--help", "--version"] {
        wallpaper()
            .args(["unicorn.jpg", flag])
            .assert()
            .code(1)
            .stdout("")
            .stderr(predicate::str::starts_with("Invalid arguments: "));
    }
}

#[test]
fn test_scale_before_path_is_rejected() {
    wallpaper()
        .args(["--scale", "tile", "unicorn.jpg"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Invalid arguments: "));
}

fn broken_config_home() -> std::path::PathBuf {
    let home = std::path::Path::new(env!("CARGO_TARGET_TMPDIR")).join("broken-config");
    std::fs::create_dir_all(home.join("wallpaper")).unwrap();
    std::fs::write(home.join("wallpaper").join("config.toml"), "scale = [").unwrap();
    home
}

#[test]
fn test_invalid_path_wins_over_broken_config() {
    let home = broken_config_home();
    wallpaper()
        .env("XDG_CONFIG_HOME", &home)
        .env("APPDATA", &home)
        .arg("")
        .assert()
        .code(1)
        .stderr("Invalid path\n");

    wallpaper()
        .env("XDG_CONFIG_HOME", &home)
        .env("APPDATA", &home)
        .arg("unicorn.jpg")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with(
            "Failed to read the configuration",
        ));
}
