//! `qemu-wrapper`: re-exec the emulator with a fixed `-cpu` pair injected.
//!
//! Install it where the binfmt handler (or chroot harness) expects the emulator.
//! All arguments pass through untouched; stdout and stderr belong to the delegate,
//! so the only output of our own is an error line on stderr when exec fails.

use qemu_wrapper::{exec_delegate, ArgVector, LaunchConfig};
use tracing_subscriber::EnvFilter;

/// Env var holding the log filter (e.g. `debug`).
const LOG_ENV: &str = "QEMU_WRAPPER_LOG";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cfg = LaunchConfig::default();
    let argv = ArgVector::build(&cfg, std::env::args_os());
    let err = exec_delegate(&cfg.target, argv);
    std::process::exit(err.exit_code());
}
