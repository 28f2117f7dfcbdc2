/// Tunables for the detector, the store and the popup
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// chrome.storage.local key holding the job list
    pub storage_key: String,
    /// Age at which a job is flagged for follow-up
    pub follow_up_after_days: i64,
    pub poll_interval_ms: i32,
    pub max_poll_attempts: u32,
    /// How long a popup status message stays visible
    pub status_clear_ms: i32,
    /// How long the page button lingers after saving
    pub button_dismiss_ms: i32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            storage_key: "jobs".to_string(),
            follow_up_after_days: 7,
            poll_interval_ms: 2000,
            max_poll_attempts: 30,
            status_clear_ms: 4000,
            button_dismiss_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();

        assert_eq!(config.storage_key, "jobs");
        assert_eq!(config.follow_up_after_days, 7);
        assert_eq!(config.poll_interval_ms, 2000);
        assert_eq!(config.max_poll_attempts, 30);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{"follow_up_after_days": 10}"#).unwrap();

        assert_eq!(config.follow_up_after_days, 10);
        assert_eq!(config.storage_key, "jobs");
        assert_eq!(config.status_clear_ms, 4000);
    }
}
