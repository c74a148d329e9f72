use serde::{Deserialize, Serialize};

/// Settings for a [`NotificationCenter`](crate::NotificationCenter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterConfig {
    /// Name of the center in log output.
    pub label: String,
    /// Warn when a delivery is dropped because its payload has the wrong type.
    pub log_mismatches: bool,
}

impl CenterConfig {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self {
            label: "default".to_string(),
            log_mismatches: true,
        }
    }
}
