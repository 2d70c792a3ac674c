use adaptive_cli::run;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

fn weights(args: &[&str]) -> (i32, String, String) {
    let mut argv = vec!["adaptive-holdem", "weights"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
#[serial]
fn reset_writes_defaults_that_show_reads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("robots.json");
    let path_str = path.to_str().unwrap();

    let (code, stdout, _) = weights(&["--path", path_str, "--reset"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Reset "));
    assert!(path.exists());

    let (code, stdout, _) = weights(&["--path", path_str]);
    assert_eq!(code, 0);
    assert!(stdout.contains("suited"));
    assert!(stdout.contains("1.2000"), "{}", stdout);
    assert!(!stdout.contains("does not exist"));
}

#[test]
#[serial]
fn corrupt_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("robots.json");
    fs::write(&path, "{\"suited\": \"a lot\"}").unwrap();
    let (code, _, stderr) = weights(&["--path", path.to_str().unwrap()]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Corrupted parameter store"), "{}", stderr);
}
