use crate::urls;

/// Local development backend, used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Environment variable pointing at the backend service.
pub const BACKEND_URL_ENV: &str = "PAPERDECK_BACKEND_URL";

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub backend_url: String,
}

impl CoreConfig {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
        }
    }

    /// Reads `PAPERDECK_BACKEND_URL`, falling back to the local dev backend.
    pub fn from_env() -> Self {
        match std::env::var(BACKEND_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Absolute URL for a backend-relative path.
    pub fn resolve(&self, path: &str) -> String {
        urls::resolve(&self.backend_url, path)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}
