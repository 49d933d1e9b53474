use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT_PATH: &str = "/hackrx/run";
pub const DEFAULT_DRAFT_STORAGE_KEY: &str = "ragFormData";
pub const DEFAULT_DRAFT_DEBOUNCE_MS: u32 = 500;
pub const DEFAULT_ERROR_DISMISS_MS: u32 = 10_000;
pub const DEFAULT_ELAPSED_TICK_MS: u32 = 1_000;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config overrides are not valid JSON: {0}")]
    Parse(String),
    #[error("endpointPath must be a path starting with / or an http(s) URL")]
    InvalidEndpoint,
    #[error("draftStorageKey must not be empty")]
    EmptyStorageKey,
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    pub endpoint_path: String,
    pub draft_storage_key: String,
    pub draft_debounce_ms: u32,
    pub error_dismiss_ms: u32,
    pub elapsed_tick_ms: u32,
    pub log_filter: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
            draft_storage_key: DEFAULT_DRAFT_STORAGE_KEY.to_string(),
            draft_debounce_ms: DEFAULT_DRAFT_DEBOUNCE_MS,
            error_dismiss_ms: DEFAULT_ERROR_DISMISS_MS,
            elapsed_tick_ms: DEFAULT_ELAPSED_TICK_MS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl FormConfig {
    /// Parses a JSON object of overrides; absent fields keep their defaults.
    pub fn from_overrides_json(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            serde_json::from_str(raw).map_err(|error| ConfigError::Parse(error.to_string()))?;
        config.endpoint_path = config.endpoint_path.trim().to_string();
        config.draft_storage_key = config.draft_storage_key.trim().to_string();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint_path.as_str();
        let endpoint_ok = (endpoint.starts_with('/') && !endpoint.starts_with("//"))
            || endpoint.starts_with("http://")
            || endpoint.starts_with("https://");
        if !endpoint_ok {
            return Err(ConfigError::InvalidEndpoint);
        }
        if self.draft_storage_key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        for (field, value) in [
            ("draftDebounceMs", self.draft_debounce_ms),
            ("errorDismissMs", self.error_dismiss_ms),
            ("elapsedTickMs", self.elapsed_tick_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDuration { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_served_page() {
        let config = FormConfig::default();
        assert_eq!(config.endpoint_path, "/hackrx/run");
        assert_eq!(config.draft_storage_key, "ragFormData");
        assert_eq!(config.draft_debounce_ms, 500);
        assert_eq!(config.error_dismiss_ms, 10_000);
        assert_eq!(config.elapsed_tick_ms, 1_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config =
            FormConfig::from_overrides_json(r#"{"endpointPath":" https://api.example.com/run ","draftDebounceMs":250}"#)
                .expect("valid overrides");
        assert_eq!(config.endpoint_path, "https://api.example.com/run");
        assert_eq!(config.draft_debounce_ms, 250);
        assert_eq!(config.draft_storage_key, DEFAULT_DRAFT_STORAGE_KEY);
    }

    #[test]
    fn rejects_bad_overrides() {
        assert_eq!(
            FormConfig::from_overrides_json(r#"{"endpointPath":"hackrx/run"}"#),
            Err(ConfigError::InvalidEndpoint)
        );
        assert_eq!(
            FormConfig::from_overrides_json(r#"{"draftStorageKey":"  "}"#),
            Err(ConfigError::EmptyStorageKey)
        );
        assert_eq!(
            FormConfig::from_overrides_json(r#"{"errorDismissMs":0}"#),
            Err(ConfigError::ZeroDuration {
                field: "errorDismissMs"
            })
        );
        assert!(matches!(
            FormConfig::from_overrides_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
