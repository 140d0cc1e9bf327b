use crate::endpoints::Locale;
use crate::transport::DEFAULT_USER_AGENT;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Provider host
    #[serde(default = "default_host")]
    pub host: String,

    /// Interface language sent as `hl`
    #[serde(default = "default_hl")]
    pub hl: String,

    /// Default geography when a request does not name one
    #[serde(default = "default_geo")]
    pub geo: String,

    /// Timezone offset in minutes, sent as `tz`
    #[serde(default = "default_timezone")]
    pub timezone: i32,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Write debug logs to a file
    #[serde(default)]
    pub debug: bool,

    /// Log file or directory; defaults next to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_rotation: Option<DebugLogRotation>,

    /// Rotated log files to keep (daily rotation only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_keep: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            hl: default_hl(),
            geo: default_geo(),
            timezone: default_timezone(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            debug: false,
            debug_log_path: None,
            debug_log_rotation: None,
            debug_log_keep: None,
        }
    }
}

impl Config {
    /// Request defaults derived from this configuration
    pub fn locale(&self) -> Locale {
        Locale {
            host: self.host.clone(),
            hl: self.hl.clone(),
            geo: self.geo.clone(),
            timezone: self.timezone,
        }
    }
}

/// How the debug log file is rotated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebugLogRotation {
    /// Append to a single file
    None,
    /// One file per day
    Daily,
}

fn default_host() -> String {
    "trends.google.com".to_string()
}

fn default_hl() -> String {
    "en-US".to_string()
}

fn default_geo() -> String {
    "US".to_string()
}

fn default_timezone() -> i32 {
    360
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
