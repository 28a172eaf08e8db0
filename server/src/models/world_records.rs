use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardView {
    Open,
    Verified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldRecordSummary {
    pub world_records: u32,
    pub verified_world_records: u32,
}

/// One leaderboard the user currently leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldRecordDetail {
    pub map_slug: String,
    pub map_name: String,
    pub game_code: String,
    pub metric_label: String,
    pub easter_egg_name: Option<String>,
    pub party_size: String,
    pub view: LeaderboardView,
    pub filter_labels: Vec<String>,
    pub value: i64,
    pub source: String,
    pub is_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldRecordsDetailed {
    pub world_records: u32,
    pub verified_world_records: u32,
    pub details: Vec<WorldRecordDetail>,
}

impl WorldRecordsDetailed {
    pub fn summary(&self) -> WorldRecordSummary {
        WorldRecordSummary {
            world_records: self.world_records,
            verified_world_records: self.verified_world_records,
        }
    }
}
