use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

const SCRIPT: &[u8] = b": << END_WIN\nECHO I'm being executed by cmd.exe!\nEXIT /B 0\nEND_WIN\n\necho \"I'm being executed by bash!\"\nexit 0\n";

const FIXED: &[u8] = b": << END_WIN\r\nECHO I'm being executed by cmd.exe!\r\nEXIT /B 0\r\nEND_WIN\r\n\necho \"I'm being executed by bash!\"\nexit 0\n";

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_adjust-line-endings"))
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("spawn adjust-line-endings")
}

fn assert_status(out: &Output, success: bool) {
    assert_eq!(
        out.status.success(),
        success,
        "unexpected status={:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
}

fn write(root: &Path, rel: &str, data: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, data).unwrap();
}

#[test]
fn single_file_with_default_delimiter() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hello.cmd");
    fs::write(&path, SCRIPT).unwrap();

    let out = run(bin().arg(&path));
    assert_status(&out, true);
    assert_eq!(fs::read(&path).unwrap(), FIXED);
    assert!(String::from_utf8_lossy(&out.stderr).contains("adjusted successfully"));
}

#[test]
fn single_file_with_explicit_delimiter() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.cmd");
    fs::write(&path, b"@echo off\nBATCH_END\necho done\r\n").unwrap();

    assert_status(&run(bin().arg(&path).arg("BATCH_END")), true);
    assert_eq!(fs::read(&path).unwrap(), b"@echo off\r\nBATCH_END\r\necho done\n");
}

#[test]
fn missing_file_reports_and_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.cmd");

    let out = run(bin().arg(&path));
    assert_status(&out, false);
    assert!(String::from_utf8_lossy(&out.stderr).contains("does not exist"));
    assert!(!path.exists());
}

#[test]
fn missing_path_without_pre_commit_is_a_usage_error() {
    let out = run(&mut bin());
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("POLYGLOT_FILE"));
}

#[test]
fn pre_commit_with_two_positionals_is_a_usage_error() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, ".gitattributes", b"*.cmd -text\n");
    write(root, "x.cmd", b"a\n");

    let out = run(bin().args(["--pre-commit", "a", "b", "--root"]).arg(root));
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unexpected argument 'b'"));
    assert_eq!(fs::read(root.join("x.cmd")).unwrap(), b"a\n");
}

#[test]
fn pre_commit_fixes_marked_files_only() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, ".gitattributes", b"# polyglots\n*.cmd -text\nbuild/** text\n");
    write(root, "hello.cmd", SCRIPT);
    write(root, "tools/other.cmd", SCRIPT);
    write(root, "build/out.txt", b"a\nb\n");

    let out = run(bin().arg("--pre-commit").arg("--root").arg(root));
    assert_status(&out, true);
    assert_eq!(fs::read(root.join("hello.cmd")).unwrap(), FIXED);
    assert_eq!(fs::read(root.join("tools/other.cmd")).unwrap(), FIXED);
    assert_eq!(fs::read(root.join("build/out.txt")).unwrap(), b"a\nb\n");
}

#[test]
fn pre_commit_takes_positional_as_delimiter() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, ".gitattributes", b"*.cmd -text\n");
    write(root, "x.cmd", b"a\nSTOP\nb\r\n");

    assert_status(&run(bin().args(["--pre-commit", "STOP", "--root"]).arg(root)), true);
    assert_eq!(fs::read(root.join("x.cmd")).unwrap(), b"a\r\nSTOP\r\nb\n");
}

#[test]
fn pre_commit_without_marked_files_succeeds() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "x.cmd", b"a\n");

    let out = run(bin().arg("--pre-commit").arg("--root").arg(root));
    assert_status(&out, true);
    assert!(String::from_utf8_lossy(&out.stderr).contains("No files with '-text' attribute found."));
    assert_eq!(fs::read(root.join("x.cmd")).unwrap(), b"a\n");
}

#[test]
fn check_mode_fails_when_files_need_fixing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, ".gitattributes", b"*.cmd -text\n");
    write(root, "hello.cmd", SCRIPT);

    let out = run(bin().args(["--pre-commit", "--mode", "check", "--root"]).arg(root));
    assert_status(&out, false);
    assert_eq!(fs::read(root.join("hello.cmd")).unwrap(), SCRIPT);

    assert_status(&run(bin().arg("--pre-commit").arg("--root").arg(root)), true);
    let out = run(bin().args(["--pre-commit", "--mode", "check", "--root"]).arg(root));
    assert_status(&out, true);
}

#[test]
fn json_report_on_stdout() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, ".gitattributes", b"*.cmd -text\n");
    write(root, "a.cmd", SCRIPT);
    write(root, "b.cmd", FIXED);

    let out = run(bin().args(["--pre-commit", "--json", "--mode", "atomic", "--root"]).arg(root));
    assert_status(&out, true);
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json report");
    assert_eq!(report["selected"], 2);
    assert_eq!(report["changed"], 1);
    assert_eq!(report["unchanged"], 1);
    assert_eq!(report["errors"], 0);
}
