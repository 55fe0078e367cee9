use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const SOURCE: &str = "<?php\n$n = count($items);\n";

fn php_to_go() -> Command {
    Command::cargo_bin("php-to-go").unwrap()
}

#[test]
fn test_convert_to_stdout() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.php");
    fs::write(&input, SOURCE).unwrap();

    php_to_go()
        .arg("convert")
        .arg("-i")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("// Code generated. MUST EDIT!"))
        .stdout(predicate::str::contains("n = len(items)"));
}

#[test]
fn test_convert_to_file_without_header() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.php");
    let output = dir.path().join("output.go");
    fs::write(&input, SOURCE).unwrap();

    php_to_go()
        .args(["convert", "--no-header", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).unwrap(), "n = len(items)");
}

#[test]
fn test_convert_without_stdlib_hooks() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.php");
    fs::write(&input, SOURCE).unwrap();

    php_to_go()
        .args(["convert", "--no-stdlib-hooks", "--no-header", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("n = count(items)"));
}

#[test]
fn test_missing_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("missing.php");

    php_to_go()
        .arg("convert")
        .arg("-i")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_existing_output_needs_force() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.php");
    let output = dir.path().join("output.go");
    fs::write(&input, SOURCE).unwrap();
    fs::write(&output, "keep").unwrap();

    php_to_go()
        .arg("convert")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File already exists"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "keep");

    php_to_go()
        .args(["convert", "--force", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();
    assert!(fs::read_to_string(&output).unwrap().contains("len(items)"));
}

#[test]
fn test_config_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.php");
    let config = dir.path().join("options.json");
    fs::write(&input, SOURCE).unwrap();
    fs::write(&config, r#"{"add_head_comment_block": false}"#).unwrap();

    php_to_go()
        .args(["convert", "--config"])
        .arg(&config)
        .arg("-i")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("MUST EDIT").not());
}

#[test]
fn test_parse_error_reports_line() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.php");
    fs::write(&input, "<?php\n$a = ;\n").unwrap();

    php_to_go()
        .arg("convert")
        .arg("-i")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_ast_dump() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.php");
    fs::write(&input, "<?php\necho 1;\n").unwrap();

    php_to_go()
        .arg("ast")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Echo\""));
}
