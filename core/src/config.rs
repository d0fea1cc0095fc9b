//! Client configuration.
//!
//! The API base (origin plus the `/api/v1` prefix) is injected once at
//! construction and lives for the whole process, so tests can point the
//! client at a mock server instead of the real backend.

/// Environment variable that overrides the API base.
pub const API_BASE_ENV: &str = "NOVELA_API_BASE";

/// Base used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base: String,
}

impl ClientConfig {
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Read the base from `NOVELA_API_BASE`, falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var(API_BASE_ENV) {
            Ok(base) if !base.trim().is_empty() => Self::new(base.trim()),
            _ => Self::default(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}
