use std::time::Duration;

use crate::poll::PollSettings;

#[derive(Debug, Clone)]
pub struct PagingSettings {
    pub project_id: String,
    pub page_size: Option<u32>,
}

impl Default for PagingSettings {
    fn default() -> Self {
        Self {
            project_id: "demo-project".to_string(),
            page_size: Some(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PollingSettings {
    pub interval_ms: u64,
    pub max_attempts: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_ms: 1000, // 1 check per second
            max_attempts: None,
            timeout_secs: Some(300),
        }
    }
}

impl PollingSettings {
    pub fn to_poll_settings(&self) -> PollSettings {
        let mut settings = PollSettings::new().with_interval(Duration::from_millis(self.interval_ms));
        if let Some(max) = self.max_attempts {
            settings = settings.with_max_attempts(max);
        }
        if let Some(secs) = self.timeout_secs {
            settings = settings.with_timeout(Duration::from_secs(secs));
        }
        settings
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub paging: PagingSettings,
    pub polling: PollingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            paging: PagingSettings::default(),
            polling: PollingSettings::default(),
        }
    }
}
