use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_syspath-set");
    Command::new(exe)
        .args(args)
        .output()
        .expect("run syspath-set")
}

fn stdout_of(out: &Output) -> String {
    assert!(
        out.status.success(),
        "syspath-set failed: status={:?}, stdout={}, stderr={}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn e2e_missing_argument_prints_usage() {
    let stdout = stdout_of(&run(&[]));
    assert!(stdout.starts_with("Usage: syspath-set"), "stdout: {stdout}");
    assert!(stdout.contains("call this as admin"), "stdout: {stdout}");
}

#[test]
fn e2e_two_arguments_print_usage() {
    let stdout = stdout_of(&run(&[r"C:\a", r"C:\b"]));
    assert!(stdout.starts_with("Usage: syspath-set"), "stdout: {stdout}");
}

#[test]
fn e2e_no_valid_paths_is_reported() {
    let stdout = stdout_of(&run(&["bad|path;<x>;"]));
    assert_eq!(stdout.trim_end(), "No valid paths found.");

    let stdout = stdout_of(&run(&[""]));
    assert_eq!(stdout.trim_end(), "No valid paths found.");
}

#[test]
fn e2e_dry_run_prints_normalized_value() {
    let stdout = stdout_of(&run(&["--dry-run", r"C:\a;C:\b;C:\a;"]));
    assert_eq!(stdout.trim_end(), r"C:\a;C:\b;");
}

#[test]
fn e2e_hyphen_leading_segment_is_normalized() {
    let stdout = stdout_of(&run(&["--dry-run", r"-tools;C:\a"]));
    assert_eq!(stdout.trim_end(), r"-tools;C:\a;");

    let stdout = stdout_of(&run(&[r"--legacy-bin;C:\a;C:\a", "--dry-run"]));
    assert_eq!(stdout.trim_end(), r"--legacy-bin;C:\a;");
}

#[test]
fn e2e_flag_lookalike_segments_are_not_options() {
    let stdout = stdout_of(&run(&["--dry-run", r"-;C:\a"]));
    assert_eq!(stdout.trim_end(), r"-;C:\a;");

    let stdout = stdout_of(&run(&["--dry-run", "-x|y"]));
    assert_eq!(stdout.trim_end(), "No valid paths found.");
}

#[cfg(unix)]
#[test]
fn e2e_non_utf8_argument_is_normalized_lossily() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let exe = env!("CARGO_BIN_EXE_syspath-set");
    let out = Command::new(exe)
        .arg("--dry-run")
        .arg(OsStr::from_bytes(b"C:\\bad\xff"))
        .output()
        .expect("run syspath-set");
    assert_eq!(stdout_of(&out).trim_end(), "No valid paths found.");

    let out = Command::new(exe)
        .arg("--dry-run")
        .arg(OsStr::from_bytes(b"C:\\bad\xff;C:\\ok"))
        .output()
        .expect("run syspath-set");
    assert_eq!(stdout_of(&out).trim_end(), r"C:\ok;");
}

#[test]
fn e2e_dry_run_json_lists_rejections() {
    let stdout = stdout_of(&run(&["--dry-run", "--json", r"C:\a;;C:\b;C:\a"]));
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("parse json");
    assert_eq!(v["value"], r"C:\a;C:\b;");
    assert_eq!(v["accepted"].as_array().map(Vec::len), Some(2));
    let reasons: Vec<_> = v["rejected"]
        .as_array()
        .expect("rejected array")
        .iter()
        .map(|r| r["reason"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(reasons, vec!["empty", "duplicate"]);
}
