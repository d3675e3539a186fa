use assert_cmd::Command;

#[test]
fn help_lists_drill_options() {
    let output = Command::cargo_bin("multitrainer")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--factors", "--secs", "--questions", "--min", "--max", "--no-save"] {
        assert!(stdout.contains(flag), "missing {flag} in help");
    }
}

#[test]
fn refuses_to_run_without_a_tty() {
    let output = Command::cargo_bin("multitrainer")
        .unwrap()
        .args(["-f", "3"])
        .write_stdin("")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("stdin must be a tty"));
}

#[test]
fn rejects_bad_factor_list() {
    let output = Command::cargo_bin("multitrainer")
        .unwrap()
        .args(["--factors", "3,seven"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
