use serde::{Deserialize, Serialize};

/// Default number of academic years the planner accepts
pub const DEFAULT_MAX_YEAR: u32 = 6;

/// Store settings supplied by the embedding application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of snapshots kept; `None` keeps every snapshot
    pub history_limit: Option<usize>,

    /// Largest planner year a slot may be created for
    pub max_year: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}

impl StoreConfig {
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit.max(1));
        self
    }

    pub fn with_max_year(mut self, max_year: u32) -> Self {
        self.max_year = max_year;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: StoreConfig = serde_json::from_str(r#"{"history_limit": 20}"#).unwrap();
        assert_eq!(config.history_limit, Some(20));
        assert_eq!(config.max_year, DEFAULT_MAX_YEAR);
    }

    #[test]
    fn test_history_limit_keeps_at_least_one_snapshot() {
        assert_eq!(StoreConfig::default().with_history_limit(0).history_limit, Some(1));
    }
}
