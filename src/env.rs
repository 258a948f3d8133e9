//! Environment variable names used by this crate for convenient
//! configuration of the logger from services.
//!
//! These are purely helpers; the backend types remain decoupled from
//! environment access.

use crate::backend::{BackendConfig, BackendKind, ParseBackendError};

/// Backend name: `console`, `syslog` or `stackdriver`.
pub const LOGR_BACKEND_ENV: &str = "LOGR_BACKEND";

/// Service name reported by the backend.
pub const LOGR_SERVICE_NAME_ENV: &str = "LOGR_SERVICE_NAME";

/// Service version reported by the backend.
pub const LOGR_SERVICE_VERSION_ENV: &str = "LOGR_SERVICE_VERSION";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl BackendConfig {
    /// Build a config from `LOGR_*` variables. Unset variables default to
    /// the console backend with an empty service identity.
    pub fn from_env() -> Result<Self, ParseBackendError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BackendConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ParseBackendError> {
        let kind = match lookup(LOGR_BACKEND_ENV) {
            Some(name) => name.parse()?,
            None => BackendKind::Console,
        };

        Ok(BackendConfig::new(
            kind,
            lookup(LOGR_SERVICE_NAME_ENV).unwrap_or_default(),
            lookup(LOGR_SERVICE_VERSION_ENV).unwrap_or_default(),
        ))
    }
}
