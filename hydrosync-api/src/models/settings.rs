use serde::{Deserialize, Serialize};

/// Poll interval assigned to newly registered devices (milliseconds)
pub const DEFAULT_POLL_FREQUENCY: u32 = 1000;

/// Device-wide configuration
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Interval between device polls in milliseconds
    pub poll_frequency: u32,
}

impl Settings {
    pub fn is_valid(&self) -> bool {
        self.poll_frequency > 0
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_frequency: DEFAULT_POLL_FREQUENCY,
        }
    }
}
