//! Process-wide configuration, loaded once from the environment.
//!
//! The binary loads `.env` via dotenvy before calling [`Settings::from_env`],
//! so every field can also be set from a dotfile. Invalid numeric values are
//! a startup error, not a silent default.

use serde::Serialize;

/// The application name reported by the root endpoint.
pub const APP_NAME: &str = "chatgate";

/// Default port for the HTTP server.
pub const DEFAULT_PORT: u16 = 8080;

/// Default base URL of the OpenAI-compatible inference engine.
pub const DEFAULT_INFERENCE_URL: &str = "http://localhost:8000/v1";

/// Default outbound request timeout, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("CHATGATE_ENABLE_AUTH is set but CHATGATE_API_KEY is empty")]
    MissingApiKey,
}

/// Application settings.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    /// Bind address for the HTTP server.
    pub host: String,
    /// Bind port for the HTTP server.
    pub port: u16,
    /// Base URL of the inference engine, including the `/v1` prefix.
    pub inference_url: String,
    /// Fixed timeout applied to all outbound inference calls, in seconds.
    pub request_timeout_secs: u64,
    /// Whether the `x-api-key` gate on `/v1/*` routes is enabled.
    pub enable_auth: bool,
    /// Expected API key when `enable_auth` is set.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Path to the SQLite database file.
    pub database_path: String,
    /// Raw CORS origin configuration: `*` or a comma-separated list.
    pub cors_origins: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            inference_url: DEFAULT_INFERENCE_URL.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            enable_auth: false,
            api_key: String::new(),
            database_path: "./chatgate.db".into(),
            cors_origins: "*".into(),
        }
    }
}

impl Settings {
    /// Load settings from `CHATGATE_*` environment variables, falling back
    /// to defaults for unset fields.
    pub fn from_env() -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        if let Ok(host) = std::env::var("CHATGATE_HOST") {
            settings.host = host;
        }
        if let Ok(port) = std::env::var("CHATGATE_PORT") {
            settings.port = parse_var("CHATGATE_PORT", &port)?;
        }
        if let Ok(url) = std::env::var("CHATGATE_INFERENCE_URL") {
            settings.inference_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(timeout) = std::env::var("CHATGATE_REQUEST_TIMEOUT_SECS") {
            settings.request_timeout_secs = parse_var("CHATGATE_REQUEST_TIMEOUT_SECS", &timeout)?;
        }
        if let Ok(enabled) = std::env::var("CHATGATE_ENABLE_AUTH") {
            settings.enable_auth = parse_bool("CHATGATE_ENABLE_AUTH", &enabled)?;
        }
        if let Ok(key) = std::env::var("CHATGATE_API_KEY") {
            settings.api_key = key;
        }
        if let Ok(path) = std::env::var("CHATGATE_DATABASE_PATH") {
            settings.database_path = path;
        }
        if let Ok(origins) = std::env::var("CHATGATE_CORS_ORIGINS") {
            settings.cors_origins = origins;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Validate cross-field constraints.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.enable_auth && self.api_key.is_empty() {
            return Err(SettingsError::MissingApiKey);
        }
        Ok(())
    }

    /// Parse the CORS origin configuration into a list. `*` yields a
    /// single-element wildcard list.
    #[must_use]
    pub fn cors_origins_list(&self) -> Vec<String> {
        if self.cors_origins.trim() == "*" {
            return vec!["*".into()];
        }
        self.cors_origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SettingsError> {
    value.parse().map_err(|_| SettingsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.inference_url, DEFAULT_INFERENCE_URL);
        assert!(!settings.enable_auth);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn wildcard_cors_stays_wildcard() {
        let settings = Settings::default();
        assert_eq!(settings.cors_origins_list(), vec!["*".to_string()]);
    }

    #[test]
    fn cors_list_is_split_and_trimmed() {
        let settings = Settings {
            cors_origins: "http://localhost:3000, https://example.com ,".into(),
            ..Settings::default()
        };
        assert_eq!(
            settings.cors_origins_list(),
            vec![
                "http://localhost:3000".to_string(),
                "https://example.com".to_string()
            ]
        );
    }

    #[test]
    fn auth_without_key_is_rejected() {
        let settings = Settings {
            enable_auth: true,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::MissingApiKey)
        ));
    }

    #[test]
    fn bool_parsing_accepts_common_spellings() {
        assert!(parse_bool("K", "true").unwrap());
        assert!(parse_bool("K", "1").unwrap());
        assert!(!parse_bool("K", "false").unwrap());
        assert!(!parse_bool("K", "0").unwrap());
        assert!(parse_bool("K", "maybe").is_err());
    }
}
