use adaptive_cli::run;
use serde_json::Value;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

const VARS: &[&str] = &[
    "ADAPTIVE_CONFIG",
    "ADAPTIVE_SEED",
    "ADAPTIVE_STACK",
    "ADAPTIVE_BLIND",
    "ADAPTIVE_WEIGHTS",
    "ADAPTIVE_MAX_HANDS",
];

fn clear_env() {
    for var in VARS {
        unsafe {
            std::env::remove_var(var);
        }
    }
}

fn cfg() -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(["adaptive-holdem", "cfg"], &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
#[serial]
fn defaults_are_reported_with_their_source() {
    clear_env();
    let (code, stdout, _) = cfg();
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["players"]["value"].as_u64(), Some(4));
    assert_eq!(json["starting_stack"]["value"].as_u64(), Some(1000));
    assert_eq!(json["seed"]["value"], Value::Null);
    assert_eq!(json["seed"]["source"].as_str(), Some("default"));
    assert_eq!(
        json["weights_path"]["value"].as_str(),
        Some("adaptive_weights.json")
    );
}

#[test]
#[serial]
fn env_overrides_file_which_overrides_defaults() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("adaptive.toml");
    fs::write(&path, "seed = 456\nstarting_blind = 50\nplayers = 6\n").unwrap();
    unsafe {
        std::env::set_var("ADAPTIVE_CONFIG", &path);
        std::env::set_var("ADAPTIVE_SEED", "789");
    }

    let (code, stdout, stderr) = cfg();
    clear_env();
    assert_eq!(code, 0, "{}", stderr);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["seed"]["value"].as_u64(), Some(789));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["starting_blind"]["value"].as_u64(), Some(50));
    assert_eq!(json["starting_blind"]["source"].as_str(), Some("file"));
    assert_eq!(json["players"]["source"].as_str(), Some("file"));
    assert_eq!(json["max_hands"]["source"].as_str(), Some("default"));
}

#[test]
#[serial]
fn invalid_env_value_fails_with_code_2() {
    clear_env();
    unsafe {
        std::env::set_var("ADAPTIVE_STACK", "0");
    }
    let (code, stdout, stderr) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Invalid configuration"), "{}", stderr);
}

#[test]
#[serial]
fn unparsable_seed_fails_every_command() {
    clear_env();
    let dir = TempDir::new().unwrap();
    unsafe {
        std::env::set_var("ADAPTIVE_SEED", "abc");
    }
    let weights = dir.path().join("w.json");
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        ["adaptive-holdem", "weights", "--path", weights.to_str().unwrap()],
        &mut out,
        &mut err,
    );
    clear_env();
    assert_eq!(code, 2);
    assert!(String::from_utf8(err).unwrap().contains("Invalid seed"));
}
