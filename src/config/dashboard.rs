//! Dashboard timing and paging configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::{AdminDashboardSettings, DashboardSettings};

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Seconds between admin dashboard refreshes
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Seconds the submission confirmation stays visible
    #[serde(default = "default_reset_delay")]
    pub reset_delay_secs: u64,

    /// Reviews per admin page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl DashboardConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn settings(&self) -> DashboardSettings {
        DashboardSettings {
            reset_delay: Duration::from_secs(self.reset_delay_secs),
            admin: AdminDashboardSettings {
                poll_interval: self.poll_interval(),
                page_size: self.page_size,
            },
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.poll_interval_secs == 0 {
            return Err(ValidationError::InvalidInterval("poll"));
        }
        if self.reset_delay_secs == 0 {
            return Err(ValidationError::InvalidInterval("reset"));
        }
        if self.page_size == 0 || self.page_size > 100 {
            return Err(ValidationError::InvalidPageSize);
        }
        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            reset_delay_secs: default_reset_delay(),
            page_size: default_page_size(),
        }
    }
}

fn default_poll_interval() -> u64 {
    30
}

fn default_reset_delay() -> u64 {
    5
}

fn default_page_size() -> u32 {
    10
}
