use std::process::{Command, Output};

use raqam_core::NumeralConvention;

fn raqam(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_raqam"))
        .args(args)
        .env_remove("RAQAM_CONVENTION")
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap().trim().to_string()
}

#[test]
fn words_renders_with_the_standard_convention() {
    let output = raqam(&["words", "2025"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "ألفان وخمسة وعشرون");
}

#[test]
fn words_rejects_out_of_range_values() {
    assert!(!raqam(&["words", "-1"]).status.success());
    assert!(!raqam(&["words", "999000000000001"]).status.success());
}

#[test]
fn number_joins_its_arguments_into_one_phrase() {
    let output = raqam(&["number", "مئة", "وثلاثة", "وعشرون"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "123");

    assert!(!raqam(&["number", "ألف", "ألف"]).status.success());
}

#[test]
fn convention_flag_loads_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spaced.json");
    let mut convention = NumeralConvention::standard();
    convention.name = "spaced".to_string();
    convention.lexicon.conjunction_attached = false;
    convention.scales.entries.truncate(2);
    convention.to_path(&path).unwrap();
    let path = path.to_str().unwrap();

    let output = raqam(&["--convention", path, "words", "21"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "واحد و عشرون");

    let output = raqam(&["--convention", path, "number", "مليون و واحد"]);
    assert_eq!(stdout(&output), "1000001");

    assert!(!raqam(&["--convention", path, "words", "1000000000"]).status.success());
}

#[test]
fn missing_convention_file_fails() {
    let output = raqam(&["--convention", "/nonexistent/raqam.json", "words", "1"]);
    assert!(!output.status.success());
}
