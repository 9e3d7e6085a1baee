//! Rewritten argument vector.
//!
//! Layout handed to the emulator:
//! `[argv0, cpu_flag, cpu_model, original[1], ..., original[N-1]]`.
//! The NULL terminator is appended by the exec binding, not stored here.

use std::ffi::{OsStr, OsString};

use crate::config::LaunchConfig;

/// Number of tokens injected after `argv0`.
pub const INJECTED: usize = 2;

/// Argument vector for one delegate launch. Built once, consumed once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgVector {
    tokens: Vec<OsString>,
}

impl ArgVector {
    /// Build the vector from the process's own arguments.
    ///
    /// `original[0]` is kept as the delegate's `argv0`, so the emulator observes the
    /// name the wrapper was invoked under. An empty `original` (possible when the
    /// caller exec'd us with no argv at all) falls back to the delegate path.
    pub fn build<I>(cfg: &LaunchConfig, original: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut original = original.into_iter();
        let trailing = original.len().saturating_sub(1);
        let mut tokens = Vec::with_capacity(1 + INJECTED + trailing);
        tokens.push(
            original
                .next()
                .unwrap_or_else(|| cfg.target.clone().into_os_string()),
        );
        tokens.push(cfg.cpu_flag.clone());
        tokens.push(cfg.cpu_model.clone());
        tokens.extend(original);
        debug_assert_eq!(tokens.len(), 1 + INJECTED + trailing);
        Self { tokens }
    }

    pub fn argv0(&self) -> &OsStr {
        &self.tokens[0]
    }

    /// Everything after `argv0`: the injected pair followed by the caller's arguments.
    pub fn args(&self) -> &[OsString] {
        &self.tokens[1..]
    }

    /// The caller's own arguments, unchanged.
    pub fn passthrough(&self) -> &[OsString] {
        &self.tokens[1 + INJECTED..]
    }

    pub fn as_slice(&self) -> &[OsString] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false: `argv0` and the injected pair are present in every vector.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Lossy UTF-8 rendering, for logs and JSON output.
    pub fn to_lossy_strings(&self) -> Vec<String> {
        self.tokens
            .iter()
            .map(|t| t.to_string_lossy().into_owned())
            .collect()
    }

    pub fn into_vec(self) -> Vec<OsString> {
        self.tokens
    }
}

#[cfg(test)]
mod tests;
