//! Command-line tests against the built `hostsys` binary.

use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

fn hostsys(args: &[&str], cwd: Option<&Path>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_hostsys"));
    command
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let mut child = command.spawn().expect("failed to start hostsys");
    match child.wait_timeout(Duration::from_secs(30)).unwrap() {
        Some(_) => child.wait_with_output().unwrap(),
        None => {
            let _ = child.kill();
            panic!("hostsys {:?} did not finish", args);
        }
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_list_shows_all_operations() {
    let output = hostsys(&["list"], None);
    assert!(output.status.success());

    let text = stdout(&output);
    for name in ["system:exit", "system:chdir", "system:dir", "system:execute", "system:wait"] {
        assert!(text.contains(name), "missing {} in {}", name, text);
    }
}

#[test]
fn test_dir_prints_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let output = hostsys(&["dir"], Some(dir.path()));
    assert!(output.status.success());

    let printed = std::path::PathBuf::from(stdout(&output));
    assert_eq!(printed.canonicalize().unwrap(), dir.path().canonicalize().unwrap());
}

#[test]
fn test_chdir_prints_new_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().to_string_lossy().into_owned();
    let output = hostsys(&["chdir", &target], None);
    assert!(output.status.success());

    let printed = std::path::PathBuf::from(stdout(&output));
    assert_eq!(printed.canonicalize().unwrap(), dir.path().canonicalize().unwrap());
}

#[test]
fn test_chdir_to_missing_directory_fails() {
    let output = hostsys(&["chdir", "/no/such/hostsys/dir"], None);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("OSQueryError"));
    assert!(stderr.contains("/no/such/hostsys/dir"));
}

#[test]
fn test_exit_code() {
    let output = hostsys(&["exit", "3"], None);
    assert_eq!(output.status.code(), Some(3));

    let output = hostsys(&["exit", "4.9"], None);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_wait_rejects_non_positive_pid() {
    for pid in ["0", "-5"] {
        let output = hostsys(&["wait", "--", pid], None);
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("InvalidArgumentError"));
    }
}

#[cfg(unix)]
#[test]
fn test_run_exits_with_child_status() {
    let output = hostsys(&["run", "--", "/bin/sh", "-c", "exit 7"], None);
    assert_eq!(output.status.code(), Some(7));

    let output = hostsys(&["run", "--", "/bin/sh", "-c", "kill -9 $$"], None);
    assert_eq!(output.status.code(), Some(9));

    let output = hostsys(&["run", "true"], None);
    assert_eq!(output.status.code(), Some(0));
}

#[cfg(unix)]
#[test]
fn test_chdir_then_run_uses_new_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().to_string_lossy().into_owned();
    let output = hostsys(&["chdir", &target, "--", "/bin/sh", "-c", "touch marker"], None);

    assert_eq!(output.status.code(), Some(0));
    assert!(dir.path().join("marker").exists());
}

#[cfg(unix)]
#[test]
fn test_execute_prints_pid() {
    let output = hostsys(&["execute", "true"], None);
    assert!(output.status.success());

    let pid: u32 = stdout(&output).parse().unwrap();
    assert!(pid > 0);
}

#[test]
fn test_bad_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("hostsys.yaml");
    std::fs::write(&config, "logging:\n  level: loud\n").unwrap();

    let output = hostsys(&["--config", config.to_str().unwrap(), "dir"], None);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid log level"));
}
