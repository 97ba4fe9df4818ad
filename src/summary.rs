use serde::Serialize;

use crate::dataset::{ChannelRecord, TimeRecord};
use crate::store::DatasetStore;

/// Shown as-is on the resolution card; not derived from any dataset.
pub const RESOLUTION_RATE: &str = "100%";

const MTD_RECORD: &str = "MTD";

/// Values for the three summary cards, recomputed on every frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_issues: f64,
    pub resolution_rate: &'static str,
    pub average_response_mtd: Option<f64>,
}

impl Summary {
    pub fn compute(store: &DatasetStore) -> Self {
        Self {
            total_issues: total_issues(store.channel()),
            resolution_rate: RESOLUTION_RATE,
            average_response_mtd: average_response_mtd(store.time()),
        }
    }

    pub fn total_issues_display(&self) -> String {
        self.total_issues.to_string()
    }

    pub fn average_response_display(&self) -> String {
        match self.average_response_mtd {
            Some(hours) => format!("{:.2}", hours),
            None => "N/A".to_string(),
        }
    }
}

pub fn total_issues(channels: &[ChannelRecord]) -> f64 {
    channels.iter().map(|record| record.mtd).sum()
}

pub fn average_response_mtd(times: &[TimeRecord]) -> Option<f64> {
    times
        .iter()
        .find(|record| record.name == MTD_RECORD)
        .map(|record| record.response)
}
