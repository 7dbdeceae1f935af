use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;

fn input(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(text.as_bytes()).expect("write input");
    file.flush().unwrap();
    file
}

fn wordcount() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wordcount"));
    cmd.env_remove("WORDCOUNT_WINDOW")
        .env_remove("WORDCOUNT_SEED")
        .env_remove("WORDCOUNT_RULES")
        .env_remove("WORDCOUNT_MAX_TOKENS")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn prints_json_report_on_stdout() {
    let file = input("البيت بيت وبيت في في البيت ده دا في\n");
    let output = wordcount()
        .arg(file.path())
        .args(["2", "3", "--window", "5"])
        .output()
        .expect("run wordcount");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    let entries = report["entries"].as_array().unwrap();
    assert_eq!(entries[0]["word"], "بيت");
    assert_eq!(entries[0]["count"], 4);
    assert_eq!(entries[1]["word"], "في");
    assert_eq!(entries[1]["count"], 3);
    assert!(entries[0]["samples"].as_array().unwrap().len() <= 3);
    assert_eq!(report["words_counted"], 9);
}

#[test]
fn reads_rules_from_file() {
    let rules = r#"{
        "phases": [
            { "kind": "irregular", "name": "joins", "joins": [ { "from": "دا", "to": "ده" } ] }
        ]
    }"#;
    let rules_file = input(rules);
    let file = input("ده دا البيت بيت");
    let output = wordcount()
        .arg(file.path())
        .args(["10", "1", "--window", "3", "--rules"])
        .arg(rules_file.path())
        .output()
        .expect("run wordcount");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let words: Vec<&str> = report["entries"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["word"].as_str())
        .collect();
    assert_eq!(words, vec!["ده", "البيت", "بيت"]);
}

#[test]
fn fails_on_even_window() {
    let file = input("في البيت في");
    let output = wordcount()
        .arg(file.path())
        .args(["--window", "4"])
        .output()
        .expect("run wordcount");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("window length"), "{stderr}");
}

#[test]
fn fails_on_missing_input() {
    let output = wordcount()
        .arg("/nonexistent/wordcount-input.txt")
        .output()
        .expect("run wordcount");
    assert!(!output.status.success());
}
