use std::path::Path;
use std::process::Command;

use qemu_wrapper::config::built_in_target;

#[test]
fn missing_delegate_exits_127_without_output() {
    if Path::new(built_in_target()).exists() {
        eprintln!("skipping: {} is installed on this host", built_in_target());
        return;
    }
    let out = Command::new(env!("CARGO_BIN_EXE_qemu-wrapper"))
        .args(["--sysroot=/target", "prog"])
        .env_remove("QEMU_WRAPPER_LOG")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(127));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("exec failed"), "stderr: {stderr}");
}

#[test]
fn log_filter_can_silence_failure_line() {
    if Path::new(built_in_target()).exists() {
        return;
    }
    let out = Command::new(env!("CARGO_BIN_EXE_qemu-wrapper"))
        .env("QEMU_WRAPPER_LOG", "off")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(127));
    assert!(out.stderr.is_empty());
}
