//! Configuration management for Vitae
//!
//! Configuration is loaded from `~/.vitae/config.json` with environment
//! variable overrides. A `.env` file in the working directory is read first,
//! so the same variables may live there.

mod types;

pub use types::*;

use std::path::{Path, PathBuf};

use crate::error::{Result, VitaeError};

const REDACTED: &str = "***";

impl Config {
    /// Returns the Vitae configuration directory path (~/.vitae)
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vitae")
    }

    /// Returns the path to the config file (~/.vitae/config.json)
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load configuration from the default path with environment overrides.
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        // A missing .env is the normal case.
        let _ = dotenvy::dotenv();
        Self::load_from_path(&Self::path())
    }

    /// Load configuration from a specific path with environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Config::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Variables follow the pattern `VITAE_SECTION_KEY`. The provider key and
    /// Pushover credentials also honour their conventional unprefixed names.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Persona
        if let Some(val) = lookup("VITAE_PERSONA_NAME") {
            self.persona.name = val;
        }
        if let Some(val) = lookup("VITAE_PERSONA_WEBSITE_URL") {
            self.persona.website_url = val;
        }

        // Knowledge
        if let Some(val) = lookup("VITAE_KNOWLEDGE_BACKUP_PATH") {
            self.knowledge.backup_path = Some(val);
        }
        if let Some(v) = lookup("VITAE_KNOWLEDGE_FETCH_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.knowledge.fetch_timeout_secs = v;
        }
        if let Some(v) =
            lookup("VITAE_KNOWLEDGE_REFRESH_INTERVAL_SECS").and_then(|v| v.parse().ok())
        {
            self.knowledge.refresh_interval_secs = v;
        }

        // Sessions
        if let Some(v) = lookup("VITAE_SESSIONS_TTL_SECS").and_then(|v| v.parse().ok()) {
            self.sessions.ttl_secs = Some(v);
        }
        if let Some(v) = lookup("VITAE_SESSIONS_MAX_ENTRIES").and_then(|v| v.parse().ok()) {
            self.sessions.max_entries = Some(v);
        }

        // Provider
        if let Some(val) = lookup("VITAE_PROVIDER_API_KEY").or_else(|| lookup("OPENAI_API_KEY")) {
            self.provider.api_key = Some(val);
        }
        if let Some(val) = lookup("VITAE_PROVIDER_API_BASE") {
            self.provider.api_base = val;
        }
        if let Some(val) = lookup("VITAE_PROVIDER_MODEL") {
            self.provider.model = val;
        }

        // Notify
        if let Some(v) = lookup("VITAE_NOTIFY_ENABLED").and_then(|v| v.parse().ok()) {
            self.notify.enabled = v;
        }
        if let Some(val) = lookup("VITAE_NOTIFY_PUSHOVER_TOKEN").or_else(|| lookup("PUSHOVER_TOKEN"))
        {
            self.notify.pushover_token = Some(val);
        }
        if let Some(val) = lookup("VITAE_NOTIFY_PUSHOVER_USER").or_else(|| lookup("PUSHOVER_USER")) {
            self.notify.pushover_user = Some(val);
        }

        // Logging
        if let Some(val) = lookup("VITAE_LOGGING_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("VITAE_LOGGING_FORMAT") {
            match val.to_ascii_lowercase().as_str() {
                "pretty" => self.logging.format = LogFormat::Pretty,
                "component" => self.logging.format = LogFormat::Component,
                "json" => self.logging.format = LogFormat::Json,
                _ => {}
            }
        }
    }

    /// Reject settings the runtime cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.persona.name.trim().is_empty() {
            return Err(VitaeError::Config("persona.name must not be empty".into()));
        }
        let url = self.persona.website_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(VitaeError::Config(format!(
                "persona.website_url must be an http(s) URL, got '{}'",
                url
            )));
        }
        if self.knowledge.refresh_interval_secs == 0 {
            return Err(VitaeError::Config(
                "knowledge.refresh_interval_secs must be greater than zero".into(),
            ));
        }
        if self.knowledge.fetch_timeout_secs == 0 {
            return Err(VitaeError::Config(
                "knowledge.fetch_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Path of the backup profile file used when the live page is unreachable.
    pub fn backup_path(&self) -> PathBuf {
        match &self.knowledge.backup_path {
            Some(path) => PathBuf::from(path),
            None => Self::dir().join("profile").join("summary.txt"),
        }
    }

    /// Copy of this config with secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        let mask = |v: &mut Option<String>| {
            if v.is_some() {
                *v = Some(REDACTED.to_string());
            }
        };
        mask(&mut copy.provider.api_key);
        mask(&mut copy.notify.pushover_token);
        mask(&mut copy.notify.pushover_user);
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.knowledge.fetch_timeout_secs, 10);
        assert_eq!(config.knowledge.refresh_interval_secs, 3600);
        assert!(config.sessions.ttl_secs.is_none());
        assert!(config.sessions.max_entries.is_none());
        assert!(config.notify.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"persona":{"name":"Ada Lovelace"}}"#).unwrap();
        assert_eq!(config.persona.name, "Ada Lovelace");
        assert!(config.persona.website_url.starts_with("https://"));
        assert_eq!(config.provider.model, "gpt-5-mini");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(lookup_from(&[
            ("VITAE_PERSONA_WEBSITE_URL", "https://example.com/"),
            ("VITAE_KNOWLEDGE_REFRESH_INTERVAL_SECS", "60"),
            ("VITAE_SESSIONS_MAX_ENTRIES", "500"),
            ("OPENAI_API_KEY", "sk-test"),
            ("PUSHOVER_TOKEN", "tok"),
            ("PUSHOVER_USER", "usr"),
            ("VITAE_LOGGING_FORMAT", "JSON"),
        ]));

        assert_eq!(config.persona.website_url, "https://example.com/");
        assert_eq!(config.knowledge.refresh_interval_secs, 60);
        assert_eq!(config.sessions.max_entries, Some(500));
        assert_eq!(config.provider.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.notify.pushover_token.as_deref(), Some("tok"));
        assert_eq!(config.notify.pushover_user.as_deref(), Some("usr"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_prefixed_key_wins_over_conventional_name() {
        let mut config = Config::default();
        config.apply_env_overrides(lookup_from(&[
            ("VITAE_PROVIDER_API_KEY", "sk-prefixed"),
            ("OPENAI_API_KEY", "sk-plain"),
        ]));
        assert_eq!(config.provider.api_key.as_deref(), Some("sk-prefixed"));
    }

    #[test]
    fn test_unparseable_override_is_ignored() {
        let mut config = Config::default();
        config.apply_env_overrides(lookup_from(&[(
            "VITAE_KNOWLEDGE_REFRESH_INTERVAL_SECS",
            "hourly",
        )]));
        assert_eq!(config.knowledge.refresh_interval_secs, 3600);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.persona.website_url = "ftp://example.com".into();
        assert!(matches!(config.validate(), Err(VitaeError::Config(_))));

        let mut config = Config::default();
        config.knowledge.refresh_interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.persona.name = "   ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_refresh_interval_minimum_is_one_second() {
        let mut config = Config::default();
        config.knowledge.refresh_interval_secs = 1;
        assert!(config.validate().is_ok());

        config.knowledge.refresh_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"knowledge":{"backup_path":"/srv/profile.txt","fetch_timeout_secs":5}}"#,
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.backup_path(), PathBuf::from("/srv/profile.txt"));
        assert_eq!(config.knowledge.fetch_timeout_secs, 5);
    }

    #[test]
    fn test_load_from_missing_path_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_path(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.knowledge.fetch_timeout_secs, 10);
    }

    #[test]
    fn test_default_backup_path() {
        let config = Config::default();
        assert!(config.backup_path().ends_with("profile/summary.txt"));
    }

    #[test]
    fn test_redacted_masks_secrets() {
        let mut config = Config::default();
        config.provider.api_key = Some("sk-secret".into());
        config.notify.pushover_token = Some("tok".into());

        let shown = config.redacted();
        assert_eq!(shown.provider.api_key.as_deref(), Some(REDACTED));
        assert_eq!(shown.notify.pushover_token.as_deref(), Some(REDACTED));
        assert!(shown.notify.pushover_user.is_none());
    }
}
