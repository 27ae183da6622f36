// tests/cli_binary.rs
//
// Drives the compiled binary for the commands that need no network or
// external tools.

use std::io::Write;
use std::process::{Command, Stdio};

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_esqlate-startup"));
    cmd.env("ESQLATE_STARTUP_LOG", "error");
    cmd
}

fn run_with_stdin(args: &[&str], input: &[u8]) -> std::process::Output {
    let dir = tempfile::tempdir().unwrap();
    let mut child = bin()
        .args(["--root", dir.path().to_str().unwrap()])
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child.stdin.take().unwrap().write_all(input).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn unknown_command_exits_one_with_registry() {
    let out = run_with_stdin(&["nope"], b"");

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    for name in ["server", "front", "build-front", "silly-grep", "download-front"] {
        assert!(stderr.contains(name), "missing {name}: {stderr}");
    }
    assert!(out.stdout.is_empty());
}

#[test]
fn unrecognised_flag_is_an_unknown_command() {
    let out = run_with_stdin(&["--bogus"], b"");

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("--bogus"), "{stderr}");
    for name in ["server", "front", "build-server", "silly-sed-front"] {
        assert!(stderr.contains(name), "missing {name}: {stderr}");
    }
    assert!(out.stdout.is_empty());
}

#[test]
fn help_still_exits_zero() {
    let out = run_with_stdin(&["--help"], b"");

    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("COMMAND"));
}

#[test]
fn silly_grep_keeps_traffic_lines() {
    let out = run_with_stdin(&["silly-grep"], b"REQUEST: a\r\nfoo\nRESPONSE:b");

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "REQUEST: a\nRESPONSE:b\n");
}

#[test]
fn silly_sed_prefixes_lines() {
    let out = run_with_stdin(&["silly-sed-server"], b"a\nb\n");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "SERVER: a\nSERVER: b\n");

    let out = run_with_stdin(&["silly-sed-front"], b"a\n");
    assert_eq!(String::from_utf8_lossy(&out.stdout), "FRONT: a\n");
}

#[test]
fn last_command_token_wins() {
    let out = run_with_stdin(&["nope", "silly-sed-front"], b"x\n");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "FRONT: x\n");
}

#[cfg(unix)]
#[test]
fn failing_setup_command_sets_exit_code_and_stops() {
    // With `git = "sh"`, the clone runs `sh clone <url> <dir>` in the root,
    // i.e. the script below.
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("clone"), "echo cloning-failed >&2\nexit 42\n").unwrap();
    std::fs::write(
        dir.path().join("esqlate-startup.toml"),
        "[tools]\ngit = \"sh\"\nnpm = \"/nonexistent/npm\"\n",
    )
    .unwrap();

    let out = bin()
        .args(["--root", dir.path().to_str().unwrap(), "build-server"])
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(42));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("exit code: 42"), "{stderr}");
    assert!(stderr.contains("cloning-failed"), "{stderr}");
    assert!(!stderr.contains("/nonexistent/npm"), "install must not run: {stderr}");
}
