//! Process image replacement and its failure taxonomy.
//!
//! `exec_delegate` only returns on failure. The failure is classified from the OS
//! error so the wrapper can exit with a stable, documented status instead of the
//! raw errno.
//!
//! The call is a plain `execv`: no PATH search and no `/bin/sh` retry on ENOEXEC,
//! so a delegate with a bad image fails here instead of being run as a script.
//! The environment and signal mask pass through as inherited. SIGPIPE is put
//! back to SIG_DFL first, since the Rust runtime ignores it at startup and an
//! ignored disposition survives exec.

use std::convert::Infallible;
use std::ffi::{CString, OsStr};
use std::fmt;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use nix::sys::signal::{signal, SigHandler, Signal};
use nix::unistd::execv;

use crate::argv::ArgVector;

/// Why the delegate could not replace the current process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaunchErrorKind {
    /// Path does not exist or a component is not a directory.
    TargetNotFound,
    /// Path exists but is not a loadable executable image.
    NotExecutable,
    /// Caller lacks the rights to execute the delegate.
    PermissionDenied,
    /// Argument, memory, or descriptor limits prevented loading the new image.
    ResourceExhaustion,
    Other,
}

impl LaunchErrorKind {
    /// Classify the error returned by the exec call.
    pub fn classify(err: &io::Error) -> Self {
        match err.raw_os_error() {
            Some(libc::ENOENT) | Some(libc::ENOTDIR) => Self::TargetNotFound,
            Some(libc::EACCES) | Some(libc::EPERM) => Self::PermissionDenied,
            Some(libc::ENOEXEC) | Some(libc::EISDIR) | Some(libc::ELIBBAD)
            | Some(libc::ETXTBSY) => Self::NotExecutable,
            Some(libc::E2BIG) | Some(libc::ENOMEM) | Some(libc::EMFILE)
            | Some(libc::ENFILE) | Some(libc::EAGAIN) => Self::ResourceExhaustion,
            Some(_) => Self::Other,
            None => match err.kind() {
                io::ErrorKind::NotFound => Self::TargetNotFound,
                io::ErrorKind::PermissionDenied => Self::PermissionDenied,
                _ => Self::Other,
            },
        }
    }

    /// Exit status the wrapper terminates with.
    ///
    /// 127 and 126 match what a POSIX shell reports for "not found" and "found but
    /// not runnable"; resource exhaustion maps to `EX_OSERR` (71).
    pub fn exit_code(self) -> i32 {
        match self {
            Self::TargetNotFound => 127,
            Self::NotExecutable | Self::PermissionDenied => 126,
            Self::ResourceExhaustion => 71,
            Self::Other => 1,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::TargetNotFound => "delegate not found",
            Self::NotExecutable => "delegate is not executable",
            Self::PermissionDenied => "permission denied",
            Self::ResourceExhaustion => "resource limit reached",
            Self::Other => "exec failed",
        }
    }
}

/// Failed process replacement. The calling process is still running.
#[derive(Debug)]
pub struct LaunchError {
    kind: LaunchErrorKind,
    target: PathBuf,
    source: io::Error,
}

impl LaunchError {
    pub fn new(target: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            kind: LaunchErrorKind::classify(&source),
            target: target.into(),
            source,
        }
    }

    pub fn kind(&self) -> LaunchErrorKind {
        self.kind
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn exit_code(&self) -> i32 {
        self.kind.exit_code()
    }
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.describe(), self.target.display())
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

fn to_cstring(token: &OsStr) -> io::Result<CString> {
    CString::new(token.as_bytes()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("argument contains a NUL byte: {:?}", token),
        )
    })
}

/// NUL-terminated copies of `target` and every token of `argv`, in order.
pub fn exec_strings(target: &Path, argv: &ArgVector) -> io::Result<(CString, Vec<CString>)> {
    let path = to_cstring(target.as_os_str())?;
    let tokens = argv
        .as_slice()
        .iter()
        .map(|t| to_cstring(t))
        .collect::<io::Result<Vec<_>>>()?;
    Ok((path, tokens))
}

fn replace_image(target: &Path, argv: &ArgVector) -> io::Result<Infallible> {
    let (path, tokens) = exec_strings(target, argv)?;
    // SAFETY: SigDfl installs no handler code.
    unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) }?;
    Ok(execv(&path, &tokens)?)
}

/// Replace the current process with `target`. Returns only on failure.
pub fn exec_delegate(target: &Path, argv: ArgVector) -> LaunchError {
    tracing::debug!(
        delegate = %target.display(),
        argv = ?argv.to_lossy_strings(),
        "exec"
    );
    let err = match replace_image(target, &argv) {
        Ok(never) => match never {},
        Err(err) => LaunchError::new(target, err),
    };
    tracing::error!(
        delegate = %target.display(),
        kind = ?err.kind(),
        os_error = %err.source,
        exit_code = err.exit_code(),
        "exec failed"
    );
    err
}
