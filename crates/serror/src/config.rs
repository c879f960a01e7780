//! Stack capture configuration.
//!
//! Library defaults with runtime environment overrides.
//!
//! # Configuration Priority (highest wins)
//!
//! 1. A config passed to [`install`] before the first error is built
//! 2. Environment variables
//! 3. Library defaults
//!
//! # Environment Variables
//!
//! - `SERROR_STACK=0` - Disable stack capture (traces are empty)
//! - `SERROR_STACK_DEPTH=<n>` - Maximum frames kept per trace (1..=256)
//!
//! # Example
//!
//! ```rust
//! use serror::config::{self, StackConfig};
//!
//! let cfg = StackConfig::from_env().max_depth(16);
//! config::install(cfg);
//! ```
//!
//! The installed config is process-wide and read-only once set.

use std::sync::OnceLock;

use crate::env::{env_get, env_get_bool};

/// Default number of frames kept per trace.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Upper bound for `max_depth`, whatever the source.
pub const MAX_DEPTH_LIMIT: usize = 256;

static CONFIG: OnceLock<StackConfig> = OnceLock::new();

/// Stack capture settings with builder pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackConfig {
    /// Walk the stack when an error node is built
    pub enabled: bool,
    /// Maximum frames kept per trace
    pub max_depth: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(feature = "backtrace"),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl StackConfig {
    /// Library defaults with `SERROR_STACK` / `SERROR_STACK_DEPTH` applied.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_get_bool("SERROR_STACK", defaults.enabled),
            max_depth: env_get("SERROR_STACK_DEPTH", defaults.max_depth),
        }
        .normalized()
    }

    /// Enable or disable capture.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the maximum frames kept per trace (clamped to 1..=256).
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        self.max_depth = self.max_depth.clamp(1, MAX_DEPTH_LIMIT);
        // Without stack walking compiled in there is nothing to enable.
        if !cfg!(feature = "backtrace") {
            self.enabled = false;
        }
        self
    }
}

/// Install the process-wide config.
///
/// Returns `false` if a config was already installed or already
/// initialized from the environment by an earlier capture.
pub fn install(config: StackConfig) -> bool {
    CONFIG.set(config.normalized()).is_ok()
}

/// The active config, initialized from the environment on first use.
#[inline]
pub fn current() -> &'static StackConfig {
    CONFIG.get_or_init(StackConfig::from_env)
}
