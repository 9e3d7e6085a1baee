//! Launch configuration.
//!
//! The defaults are baked in at compile time. Set `QEMU_WRAPPER_TARGET` and/or
//! `QEMU_WRAPPER_CPU` in the build environment to produce a wrapper for a
//! different emulator or core; the built binary never reads them at runtime.

use std::ffi::OsString;
use std::path::PathBuf;

/// Emulator the wrapper hands off to when no build-time override is given.
pub const DEFAULT_TARGET: &str = "/usr/bin/qemu-arm-static0";
/// CPU model injected when no build-time override is given.
pub const DEFAULT_CPU_MODEL: &str = "arm1176";
/// Flag token the emulator uses to select the CPU model.
pub const CPU_FLAG: &str = "-cpu";

/// Delegate path and CPU selection for one launch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Absolute path of the emulator binary.
    pub target: PathBuf,
    pub cpu_flag: OsString,
    pub cpu_model: OsString,
}

impl LaunchConfig {
    pub fn new(target: impl Into<PathBuf>, cpu_model: impl Into<OsString>) -> Self {
        Self {
            target: target.into(),
            cpu_flag: OsString::from(CPU_FLAG),
            cpu_model: cpu_model.into(),
        }
    }

    /// Override the delegate path.
    pub fn with_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = target.into();
        self
    }

    /// Override the CPU model.
    pub fn with_cpu_model(mut self, cpu_model: impl Into<OsString>) -> Self {
        self.cpu_model = cpu_model.into();
        self
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self::new(built_in_target(), built_in_cpu_model())
    }
}

/// Delegate path compiled into this build.
pub fn built_in_target() -> &'static str {
    non_empty(option_env!("QEMU_WRAPPER_TARGET")).unwrap_or(DEFAULT_TARGET)
}

/// CPU model compiled into this build.
pub fn built_in_cpu_model() -> &'static str {
    non_empty(option_env!("QEMU_WRAPPER_CPU")).unwrap_or(DEFAULT_CPU_MODEL)
}

fn non_empty(value: Option<&'static str>) -> Option<&'static str> {
    value.filter(|v| !v.trim().is_empty())
}
