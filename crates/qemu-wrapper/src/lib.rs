//! Argument rewriting and process replacement for a user-mode CPU emulator.
//!
//! The wrapper sits where a binfmt handler or chroot harness expects the emulator
//! and re-executes the real emulator with a fixed `-cpu <model>` pair injected
//! in front of the caller's arguments.
//!
//! Layout
//! - `config`: delegate path and CPU selection, with build-time defaults.
//! - `argv`: construction of the rewritten argument vector.
//! - `launch`: the exec call and the failure taxonomy / exit codes.

pub mod argv;
pub mod config;
pub mod launch;

pub use argv::ArgVector;
pub use config::LaunchConfig;
pub use launch::{exec_delegate, LaunchError, LaunchErrorKind};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
