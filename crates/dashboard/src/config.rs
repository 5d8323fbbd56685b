/// Environment variable (native) or build-time variable (wasm) naming the backend.
pub const BACKEND_URL_ENV: &str = "SPACE_MISSION_BACKEND_URL";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl BackendConfig {
    /// Blank values fall back to [`DEFAULT_BACKEND_URL`]; trailing slashes are dropped.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let trimmed = base_url.as_ref().trim().trim_end_matches('/');
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self {
                base_url: trimmed.to_string(),
            }
        }
    }

    pub fn from_setting(value: Option<&str>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }

    /// Reads [`BACKEND_URL_ENV`] from the process environment.
    pub fn from_env() -> Self {
        Self::from_setting(std::env::var(BACKEND_URL_ENV).ok().as_deref())
    }

    /// Reads [`BACKEND_URL_ENV`] as captured at compile time.
    pub fn from_build() -> Self {
        Self::from_setting(option_env!("SPACE_MISSION_BACKEND_URL"))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn query_url(&self) -> String {
        format!("{}{}", self.base_url, protocol::QUERY_PATH)
    }

    pub fn health_url(&self) -> String {
        format!("{}{}", self.base_url, protocol::HEALTH_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::{BackendConfig, DEFAULT_BACKEND_URL};

    #[test]
    fn falls_back_to_localhost() {
        assert_eq!(BackendConfig::from_setting(None).base_url(), DEFAULT_BACKEND_URL);
        assert_eq!(BackendConfig::new("   ").base_url(), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn trims_trailing_slashes() {
        let cfg = BackendConfig::new("https://missions.example.org/api//");
        assert_eq!(cfg.base_url(), "https://missions.example.org/api");
        assert_eq!(cfg.query_url(), "https://missions.example.org/api/query");
        assert_eq!(cfg.health_url(), "https://missions.example.org/api/health");
    }

    #[test]
    fn explicit_setting_wins() {
        let cfg = BackendConfig::from_setting(Some("http://10.0.0.5:9000"));
        assert_eq!(cfg.query_url(), "http://10.0.0.5:9000/query");
    }
}
