extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

fn mandelbox() -> Command {
    Command::cargo_bin("mandelbox").unwrap()
}

#[test]
fn renders_a_slice_to_pgm() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slice.pgm");
    mandelbox()
        .arg("--output")
        .arg(&path)
        .args(&["--size", "16x8", "--threads", "1", "--iterations", "12"])
        .assert()
        .success();
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"P5"));
    assert!(bytes.len() > 16 * 8);
}

#[test]
fn scatters_a_three_dimensional_slice_in_single_precision() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scatter.pgm");
    mandelbox()
        .arg("-o")
        .arg(&path)
        .args(&[
            "--size",
            "10x10",
            "--dimension",
            "3",
            "--slice",
            "0,0,-0.5",
            "--precision",
            "single",
            "--samples",
            "25",
            "--scale",
            "-2.0",
        ])
        .assert()
        .success();
    assert!(path.exists());
}

#[test]
fn refuses_a_bad_size() {
    let dir = tempfile::tempdir().unwrap();
    mandelbox()
        .arg("-o")
        .arg(dir.path().join("never.pgm"))
        .args(&["--size", "16by8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse output image size"));
}

#[test]
fn refuses_a_slice_of_the_wrong_length() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.pgm");
    mandelbox()
        .arg("-o")
        .arg(&path)
        .args(&["--dimension", "3", "--slice", "0,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Render failure: Expected a coordinate with 3 axes, found 2.",
        ));
    assert!(!path.exists());
}

#[test]
fn refuses_inverted_corners() {
    let dir = tempfile::tempdir().unwrap();
    mandelbox()
        .arg("-o")
        .arg(dir.path().join("never.pgm"))
        .args(&["--leftlower", "1,1", "--rightupper", "-1,-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure: Bad plane"));
}
