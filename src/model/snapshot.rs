//! Multi-week carriers supplied by the data layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::WorkItem;

/// One labeled week of work items.
///
/// Multi-week callers (trend detection, week-over-week insights) pass a
/// time-ordered slice of these. Ordering is an input precondition — the
/// engine never sorts by `week_of`, it only carries it for labeling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSnapshot {
    pub week_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_of: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<WorkItem>,
}

impl WeekSnapshot {
    pub fn new(week_label: impl Into<String>, items: Vec<WorkItem>) -> Self {
        Self {
            week_label: week_label.into(),
            week_of: None,
            items,
        }
    }

    pub fn with_week_of(mut self, week_of: NaiveDate) -> Self {
        self.week_of = Some(week_of);
        self
    }
}
