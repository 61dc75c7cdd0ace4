use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tra-scu"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tra-scu CLI")
}

fn temp_config_path(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    std::env::temp_dir()
        .join(format!("{prefix}_{}_{}", std::process::id(), nanos))
        .join("TRAE.arg")
}

fn write_config(path: &PathBuf, contents: &str) {
    fs::create_dir_all(path.parent().expect("config path has a parent"))
        .expect("failed to create temp dir");
    fs::write(path, contents).expect("failed to write config fixture");
}

fn cleanup(path: &PathBuf) {
    if let Some(dir) = path.parent() {
        let _ = fs::remove_dir_all(dir);
    }
}

#[test]
fn cli_prints_argument_line_of_existing_file() {
    let path = temp_config_path("cli_args");
    write_config(&path, "ma3 -NOMAINMENU -PLAYER lara_sport");
    let path_str = path.to_string_lossy().to_string();

    let output = run_cli(&["--args", &path_str]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end(), "ma3 -NOMAINMENU -PLAYER lara_sport");

    cleanup(&path);
}

#[test]
fn cli_treats_missing_file_as_defaults() {
    let path = temp_config_path("cli_missing");
    let path_str = path.to_string_lossy().to_string();

    let output = run_cli(&["--args", &path_str]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "\n");
    assert!(!path.exists(), "reading must not create the file");
}

#[test]
fn cli_edits_write_exact_line_without_newline() {
    let path = temp_config_path("cli_edit");
    let path_str = path.to_string_lossy().to_string();

    let output = run_cli(&[
        &path_str,
        "--level",
        "ma3",
        "--outfit",
        "lara_sport",
        "--enable",
        "-NOHEALTH",
        "--param",
        "-FONTNAME=Arial",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written = fs::read_to_string(&path).expect("config should be written");
    assert_eq!(
        written,
        "ma3 -NOMAINMENU -PLAYER lara_sport -FONTNAME \"Arial\" -NOHEALTH"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote configuration to"));
    assert!(stdout.contains("Checkpoint 3 (ma3)"));

    cleanup(&path);
}

#[test]
fn cli_edits_build_on_existing_file() {
    let path = temp_config_path("cli_incremental");
    write_config(&path, "gr5 -NOMAINMENU -NOTRACE");
    let path_str = path.to_string_lossy().to_string();

    let output = run_cli(&[
        &path_str,
        "--group",
        "Mansion",
        "--checkpoint",
        "1",
        "--disable",
        "-NOTRACE",
        "--enable",
        "-EASYCHEAT",
        "--args",
    ]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "ma2 -NOMAINMENU -EASYCHEAT"
    );
    assert_eq!(
        fs::read_to_string(&path).expect("config should exist"),
        "ma2 -NOMAINMENU -EASYCHEAT"
    );

    cleanup(&path);
}

#[test]
fn cli_main_menu_and_default_outfit_clear_selection() {
    let path = temp_config_path("cli_clear");
    write_config(&path, "ma3 -NOMAINMENU -PLAYER lara_gold");
    let path_str = path.to_string_lossy().to_string();

    let output = run_cli(&[&path_str, "--main-menu", "--default-outfit", "--args"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "\n");
    assert_eq!(fs::read_to_string(&path).expect("config should exist"), "");

    cleanup(&path);
}

#[test]
fn cli_resets_malformed_file_to_defaults() {
    let path = temp_config_path("cli_malformed");
    write_config(&path, "ma3 -BOGUSFLAG");
    let path_str = path.to_string_lossy().to_string();

    let output = run_cli(&["--args", &path_str]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not load configuration"));
    assert!(stderr.contains("'-BOGUSFLAG' is not recognized"));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "\n");

    cleanup(&path);
}

#[test]
fn cli_keeps_partial_state_on_request() {
    let path = temp_config_path("cli_partial");
    write_config(&path, "ma3 -BOGUSFLAG -NOHEALTH");
    let path_str = path.to_string_lossy().to_string();

    let output = run_cli(&["--keep-partial", "--args", &path_str]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "ma3 -NOMAINMENU -NOHEALTH"
    );

    cleanup(&path);
}

#[test]
fn cli_strict_mode_fails_on_malformed_file() {
    let path = temp_config_path("cli_strict");
    write_config(&path, "-FONTNAME");
    let path_str = path.to_string_lossy().to_string();

    let output = run_cli(&["--strict", &path_str]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expects a parameter"));

    cleanup(&path);
}

#[test]
fn cli_json_output_describes_selection() {
    let path = temp_config_path("cli_json");
    write_config(&path, "lc16 -NOMAINMENU -CHAPTERVARS \"7\"\n");
    let path_str = path.to_string_lossy().to_string();

    let output = run_cli(&["--json", &path_str]);
    assert!(output.status.success());
    let value: Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(value["checkpoint"], "lc16");
    assert_eq!(value["level_group"], "Lost City - Great Pyramid");
    assert_eq!(value["advanced"]["-CHAPTERVARS"]["enabled"], true);
    assert_eq!(value["advanced"]["-CHAPTERVARS"]["parameter"], "7");
    assert_eq!(value["arguments"], "lc16 -NOMAINMENU -CHAPTERVARS \"7\"");

    cleanup(&path);
}

#[test]
fn cli_reset_removes_file() {
    let path = temp_config_path("cli_reset");
    write_config(&path, "ma1 -NOMAINMENU");
    let path_str = path.to_string_lossy().to_string();

    let output = run_cli(&["--reset", &path_str]);
    assert!(output.status.success());
    assert!(!path.exists());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Removed "));

    let output = run_cli(&["--reset", &path_str]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Nothing to remove"));

    cleanup(&path);
}

#[test]
fn cli_rejects_unknown_values() {
    let path = temp_config_path("cli_unknown");
    let path_str = path.to_string_lossy().to_string();

    let output = run_cli(&[&path_str, "--outfit", "lara_bikini"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error applying outfit edit"));
    assert!(!path.exists(), "failed edits must not write");

    let output = run_cli(&[&path_str, "--param", "-FONTNAME=Times New Roman"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!path.exists());

    let output = run_cli(&[&path_str, "--group", "Mansion", "--checkpoint", "40"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!path.exists());
}

#[test]
fn cli_requires_a_config_location() {
    let output = run_cli(&["--args"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_lists_catalog_without_config() {
    let output = run_cli(&["--list-outfits"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 11);
    assert!(stdout.contains("lara_dgang"));

    let output = run_cli(&["--list-options", "--json"]);
    assert!(output.status.success());
    let value: Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(value.as_array().map(Vec::len), Some(12));
}

#[test]
fn cli_rejects_listings_mixed_with_config_edits() {
    let path = temp_config_path("cli_list_edit");
    let path_str = path.to_string_lossy().to_string();

    let output = run_cli(&[&path_str, "--level", "ma3", "--list-outfits"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(!path.exists());

    let output = run_cli(&["--reset", &path_str, "--list-levels"]);
    assert_eq!(output.status.code(), Some(2));

    let output = run_cli(&["--list-levels", "--list-options"]);
    assert!(output.status.success());

    cleanup(&path);
}
