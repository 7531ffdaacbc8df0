use serde::Deserialize;
use std::path::Path;
use tracing::error;

const DEFAULT_API_BASE_URL: &str = "https://api.fieldops.example";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Maximum allowed percent difference between a drawn polygon's area and the
/// plot's recorded area, unless overridden.
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 10.0;

// ─── TOML config file ─────────────────────────────────────────────────────────

/// `config.toml` — all fields are optional overrides.
/// Priority: env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// Override the backend API base URL.
    api_base_url: Option<String>,
    /// Area tolerance handed to the validation authority (percent).
    tolerance_percent: Option<f64>,
    /// Timeout for validation and persistence HTTP calls (seconds).
    request_timeout_secs: Option<u64>,
    /// Log level filter string, e.g. "debug", "info,plotcap=trace".
    log: Option<String>,
    /// Log output format: "pretty" (default, human-readable) | "json".
    log_format: Option<String>,
}

fn load_toml(path: &Path) -> Option<TomlConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config.toml — using defaults");
            None
        }
    }
}

// ─── CaptureConfig ────────────────────────────────────────────────────────────

/// Runtime configuration for the capture subsystem.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Backend API base URL (PLOTCAP_API_URL env var).
    pub api_base_url: String,
    /// Area tolerance handed to the validation authority (PLOTCAP_TOLERANCE).
    pub tolerance_percent: f64,
    /// Timeout for validation and persistence HTTP calls, seconds.
    pub request_timeout_secs: u64,
    /// Log level filter string (PLOTCAP_LOG).
    pub log: String,
    /// Log output format: "pretty" | "json" (PLOTCAP_LOG_FORMAT).
    pub log_format: String,
}

impl CaptureConfig {
    /// Build config from env vars plus an optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. env var
    ///   2. TOML file, when a path is given
    ///   3. built-in default
    pub fn load(config_path: Option<&Path>) -> Self {
        let toml = config_path.and_then(load_toml).unwrap_or_default();

        let api_base_url = std::env::var("PLOTCAP_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let tolerance_percent = std::env::var("PLOTCAP_TOLERANCE")
            .ok()
            .and_then(|s| s.parse().ok())
            .or(toml.tolerance_percent)
            .unwrap_or(DEFAULT_TOLERANCE_PERCENT);

        let request_timeout_secs = toml
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let log = std::env::var("PLOTCAP_LOG")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log)
            .unwrap_or_else(|| "info".to_string());

        let log_format = std::env::var("PLOTCAP_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        Self {
            api_base_url,
            tolerance_percent,
            request_timeout_secs,
            log,
            log_format,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            tolerance_percent: DEFAULT_TOLERANCE_PERCENT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_a_file() {
        let config = CaptureConfig::default();
        assert_eq!(config.tolerance_percent, 10.0);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.log_format, "pretty");
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "api_base_url = \"http://localhost:9100\"").unwrap();
        writeln!(f, "tolerance_percent = 7.5").unwrap();
        writeln!(f, "log_format = \"json\"").unwrap();

        let config = CaptureConfig::load(Some(&path));
        assert_eq!(config.api_base_url, "http://localhost:9100");
        assert_eq!(config.tolerance_percent, 7.5);
        assert_eq!(config.log_format, "json");
        // Untouched fields fall through to the defaults.
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn malformed_toml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tolerance_percent = [not toml").unwrap();

        let config = CaptureConfig::load(Some(&path));
        assert_eq!(config.tolerance_percent, DEFAULT_TOLERANCE_PERCENT);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CaptureConfig::load(Some(&dir.path().join("nope.toml")));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
