use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state_machine::TourStatus;

/// The persisted `{status, stepIndex, updatedAt}` tuple for one identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourProgress {
    pub status: TourStatus,
    #[serde(default)]
    pub step_index: usize,
    /// Set on every write. `None` until first persisted.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for TourProgress {
    fn default() -> Self {
        Self {
            status: TourStatus::Inactive,
            step_index: 0,
            updated_at: None,
        }
    }
}

impl TourProgress {
    pub fn new(status: TourStatus, step_index: usize) -> Self {
        Self {
            status,
            step_index,
            updated_at: None,
        }
    }

    /// Copy with `updated_at` set to `now`.
    pub fn stamped(&self, now: DateTime<Utc>) -> Self {
        Self {
            updated_at: Some(now),
            ..self.clone()
        }
    }
}
