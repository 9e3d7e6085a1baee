use serde::Serialize;
use std::process::Command;

use qemu_wrapper::config::{built_in_cpu_model, built_in_target, CPU_FLAG};

/// Build facts printed by `cli report`.
#[derive(Debug, Serialize)]
pub struct Report {
    pub version: &'static str,
    pub code_rev: String,
    pub defaults: Defaults,
}

/// What the `qemu-wrapper` binary from this build injects and execs.
#[derive(Debug, Serialize)]
pub struct Defaults {
    pub target: &'static str,
    pub cpu_flag: &'static str,
    pub cpu_model: &'static str,
}

impl Report {
    pub fn collect() -> Self {
        Self {
            version: qemu_wrapper::VERSION,
            code_rev: current_git_rev(),
            defaults: Defaults {
                target: built_in_target(),
                cpu_flag: CPU_FLAG,
                cpu_model: built_in_cpu_model(),
            },
        }
    }
}

/// Commit the build came from: `GIT_COMMIT` at build time, then at runtime, then
/// `git rev-parse HEAD`; `"unknown"` when none of those yield anything.
pub fn current_git_rev() -> String {
    let built = option_env!("GIT_COMMIT").map(str::to_owned);
    let runtime = std::env::var("GIT_COMMIT").ok();
    built
        .into_iter()
        .chain(runtime)
        .find(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn git_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let rev = String::from_utf8(output.stdout).ok()?;
    let rev = rev.trim();
    (!rev.is_empty()).then(|| rev.to_owned())
}
