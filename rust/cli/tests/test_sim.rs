use adaptive_cli::run;
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn sim(args: &[&str], weights: &Path) -> (i32, String, String) {
    let mut argv = vec!["adaptive-holdem", "sim", "--weights", weights.to_str().unwrap()];
    argv.extend_from_slice(args);
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn hands_played(stdout: &str) -> usize {
    let line = stdout.lines().find(|l| l.starts_with("Winner: ")).unwrap();
    let n = line.split("after ").nth(1).unwrap().trim_end_matches(" hands");
    n.parse().unwrap()
}

#[test]
#[serial]
fn sim_writes_one_history_record_per_hand() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("hands/history.jsonl");
    let (code, stdout, stderr) = sim(
        &[
            "--hands",
            "8",
            "--seed",
            "1",
            "--players",
            "3",
            "--history",
            history.to_str().unwrap(),
        ],
        &dir.path().join("w.json"),
    );
    assert_eq!(code, 0, "stderr={}", stderr);

    let played = hands_played(&stdout);
    assert!(played >= 1 && played <= 8);
    let contents = fs::read_to_string(&history).unwrap();
    let records: Vec<serde_json::Value> = contents
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), played);
    assert_eq!(records[0]["hand"].as_u64(), Some(1));
    assert_eq!(records[0]["seed"].as_u64(), Some(1));
    assert!(stdout.contains(&format!("History: {} hands written", played)));
}

#[test]
#[serial]
fn same_seed_with_fresh_weights_replays_identically() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let args = ["--hands", "20", "--seed", "77", "--verbose"];
    let (c1, out1, _) = sim(&args, &a.path().join("w.json"));
    let (c2, out2, _) = sim(&args, &b.path().join("w.json"));
    assert_eq!((c1, c2), (0, 0));
    assert_eq!(out1.replace(a.path().to_str().unwrap(), ""), out2.replace(b.path().to_str().unwrap(), ""));
    assert!(out1.contains("posts"));
}

#[test]
#[serial]
fn sim_persists_learned_weights() {
    let dir = TempDir::new().unwrap();
    let weights = dir.path().join("w.json");
    let (code, _, _) = sim(&["--hands", "10", "--seed", "4"], &weights);
    assert_eq!(code, 0);
    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&weights).unwrap()).unwrap();
    for key in [
        "suited",
        "pair",
        "highStraightChance",
        "lowStraightChance",
        "highCard",
        "doubleHighCard",
    ] {
        assert!(saved[key].as_f64().unwrap() > 0.0, "{}", key);
    }
}

#[test]
#[serial]
fn zero_blind_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, stderr) = sim(&["--blind", "0"], &dir.path().join("w.json"));
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("starting_blind must be >0"), "{}", stderr);
}
