use std::io::Write;

use tempfile::NamedTempFile;
use wordcount_morph::{Phase, RuleSet};

#[test]
fn loads_default_tables_written_as_json() {
    let rules = RuleSet::egyptian();
    let mut file = NamedTempFile::new().expect("temp file");
    serde_json::to_writer_pretty(&mut file, &rules).expect("write rules");
    file.flush().unwrap();

    let loaded = RuleSet::load(file.path()).expect("load rules");
    assert_eq!(loaded, rules);
}

#[test]
fn custom_phase_order_is_kept() {
    let mut rules = RuleSet::egyptian();
    rules.phases.swap(5, 6);
    let mut file = NamedTempFile::new().expect("temp file");
    serde_json::to_writer(&mut file, &rules).expect("write rules");
    file.flush().unwrap();

    let loaded = RuleSet::load(file.path()).expect("load rules");
    let names: Vec<&str> = loaded.phases.iter().map(Phase::name).collect();
    assert_eq!(names[5], "nouns");
    assert_eq!(names[6], "verbs");
}

#[test]
fn reports_missing_and_invalid_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("rules.json");
    let err = RuleSet::load(&missing).unwrap_err();
    assert!(err.to_string().contains("read rule file"));

    std::fs::write(&missing, r#"{ "phases": [ { "kind": "irregular", "name": "j", "joins": [ { "from": "", "to": "راح" } ] } ] }"#).unwrap();
    let err = RuleSet::load(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("empty side"));
}
