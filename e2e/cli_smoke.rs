//! End-to-end smoke test for the `esa-matchfind` binary.

use std::io::Write;
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_esa-matchfind"))
}

#[test]
fn histogram_mode_reports_a_summary_for_a_repetitive_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"abcabcabcabcabcabcabc").unwrap();

    let output = bin().arg(file.path()).output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("positions: 21"));
    assert!(stdout.contains("total matches emitted:"));
}

#[test]
fn dump_mode_prints_one_line_per_match() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"abcabcabcabcabcabcabc").unwrap();

    let output = bin().arg(file.path()).arg("--dump").arg("--min-len").arg("3").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(!lines.is_empty());
    for line in lines {
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 3);
        fields[0].parse::<usize>().unwrap();
        fields[1].parse::<i32>().unwrap();
        fields[2].parse::<i32>().unwrap();
    }
}

#[test]
fn empty_file_is_reported_without_a_panic() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let output = bin().arg(file.path()).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("empty"));
}

#[test]
fn missing_file_reports_an_error_instead_of_panicking() {
    let output = bin().arg("/nonexistent/path/does-not-exist").output().unwrap();
    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).is_empty());
}
