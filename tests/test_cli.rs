// Drives the built clacker binary end to end
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn clacker(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clacker"))
        .args(args)
        .env_remove("CLACKER_WORDS")
        .env_remove("CLACKER_LOG")
        .output()
        .expect("Failed to execute clacker")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_single_program() {
    let output = clacker(&["3 4 +"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "7\n");
    assert_eq!(stderr(&output), "");
}

#[test]
fn test_single_program_reports_domain_errors() {
    let output = clacker(&["5 0 /"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
    assert_eq!(stderr(&output), "Cannot divide by 0\n");
}

#[test]
fn test_quit_in_program_exits_cleanly() {
    let output = clacker(&["1 quit 2 ."]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_calc_help() {
    let output = clacker(&["--calc-help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("operator: +"));
    assert!(text.contains("operator: round"));
    assert!(text.contains("operator: help"));
}

#[test]
fn test_version() {
    let output = clacker(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("clacker "));
}

#[test]
fn test_short_version_flag_is_lowercase() {
    let output = clacker(&["-v"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), format!("clacker {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_words_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "cube 3 ^").unwrap();

    let path = file.path().to_str().unwrap();
    let output = clacker(&["-w", path, "2 cube"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "2 3\n8\n");
}

#[test]
fn test_words_file_with_rejected_definition() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "+ 1 1").unwrap();
    writeln!(file, "two 2").unwrap();

    let path = file.path().to_str().unwrap();
    let output = clacker(&["--words-file", path, "two"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "2\n");
    let err = stderr(&output);
    assert!(err.contains("Cannot redefine: +"));
    assert!(err.contains("Run `help` to see list of operators that cannot be redefined"));
}

#[test]
fn test_words_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_clacker"))
        .args(["-w", "-", "4 half"])
        .env_remove("CLACKER_WORDS")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn clacker");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"half 2 /\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "4 2\n2\n");
}

#[test]
fn test_missing_words_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.words");
    let output = clacker(&["-w", missing.to_str().unwrap(), "1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to read words file"));
}
