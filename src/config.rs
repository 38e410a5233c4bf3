//! Application configuration.
//!
//! Loaded from YAML; service credentials can be supplied through the
//! environment instead of the file.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::geocode::NaverConfig;
use crate::tmap::TmapConfig;
use crate::tracker::TrackerConfig;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tracker: TrackerConfig,
    pub tmap: TmapConfig,
    pub naver: NaverConfig,
    /// Assumed speed for the straight-line fallback route, km/h.
    pub fallback_speed_kmh: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            tmap: TmapConfig::default(),
            naver: NaverConfig::default(),
            fallback_speed_kmh: 40.0,
        }
    }
}

impl Config {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Fills credentials from `TMAP_APP_KEY`, `NAVER_CLIENT_ID` and
    /// `NAVER_CLIENT_SECRET` when set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());
        if let Some(key) = get("TMAP_APP_KEY") {
            self.tmap.app_key = Some(key);
        }
        if let Some(id) = get("NAVER_CLIENT_ID") {
            self.naver.client_id = Some(id);
        }
        if let Some(secret) = get("NAVER_CLIENT_SECRET") {
            self.naver.client_secret = Some(secret);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = Config::from_yaml_str("{}").unwrap();
        assert_eq!(config.tracker, TrackerConfig::default());
        assert_eq!(config.tracker.deviation_threshold_m, 50.0);
        assert_eq!(config.tracker.imminent_turn_m, 15.0);
        assert_eq!(config.tmap.search_option, "0");
        assert!(config.tmap.app_key.is_none());
        assert_eq!(config.fallback_speed_kmh, 40.0);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "
tracker:
  deviation_threshold_m: 80
  reroute_cooldown_ms: 5000
tmap:
  app_key: abc
  traffic_info: false
";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.tracker.deviation_threshold_m, 80.0);
        assert_eq!(config.tracker.imminent_turn_m, 15.0);
        assert_eq!(config.tracker.reroute_cooldown_ms, 5000);
        assert_eq!(config.tmap.app_key.as_deref(), Some("abc"));
        assert!(!config.tmap.traffic_info);
        assert_eq!(config.tmap.timeout_secs, 10);
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Config::from_yaml_str("tracker: [1, 2");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::load("/nonexistent/hud-route.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(|name| match name {
            "TMAP_APP_KEY" => Some("tmap-key".to_string()),
            "NAVER_CLIENT_ID" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.tmap.app_key.as_deref(), Some("tmap-key"));
        assert!(config.naver.client_id.is_none());
        assert!(config.naver.client_secret.is_none());
    }
}
