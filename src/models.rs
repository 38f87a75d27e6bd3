use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Recurrence granularity of a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatType {
    #[default]
    Day,
    Week,
    Month,
}

/// A recurring goal tracked by completion count and recency.
///
/// Persisted as one element of the JSON array in the data file, with
/// camelCase keys and RFC 3339 timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub repeat_type: RepeatType,
    /// Weekday indices, 0 = Sunday. Only meaningful for weekly streaks.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub selected_days: BTreeSet<u8>,
    pub count: u32,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub is_quantity_based: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_goal: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub daily_progress: u32,
    #[serde(default)]
    pub order: usize,
}

/// The whole streak collection, stored as a bare JSON array.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct AppData {
    pub streaks: Vec<Streak>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewStreak {
    pub name: String,
    #[serde(default)]
    pub repeat_type: RepeatType,
    #[serde(default)]
    pub selected_days: Vec<u8>,
    #[serde(default)]
    pub is_quantity_based: bool,
    #[serde(default)]
    pub daily_goal: Option<u32>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Direct overwrite of editable fields. Bypasses the toggle transition.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StreakEdit {
    pub name: Option<String>,
    pub count: Option<u32>,
    pub daily_goal: Option<u32>,
    pub daily_progress: Option<u32>,
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakView {
    #[serde(flatten)]
    pub streak: Streak,
    pub completed_today: bool,
    pub clickable_today: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LongestStreak {
    pub id: String,
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledDay {
    pub date: String,
    pub weekday: String,
    pub scheduled: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub date: String,
    pub total: usize,
    pub clickable_today: usize,
    pub completed_today: usize,
    pub remaining_today: usize,
    pub total_count: u64,
    pub longest: Option<LongestStreak>,
    pub this_week: Vec<ScheduledDay>,
}
