use crate::models::attributes::RunAttributes;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Display and rules context for one map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapContext {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub game_code: String,
}

#[derive(Debug, Clone, Default)]
pub struct MapCatalog {
    maps: HashMap<i64, MapContext>,
}

impl MapCatalog {
    pub fn get(&self, map_id: i64) -> Option<&MapContext> {
        self.maps.get(&map_id)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

impl FromIterator<MapContext> for MapCatalog {
    fn from_iter<I: IntoIterator<Item = MapContext>>(iter: I) -> Self {
        MapCatalog {
            maps: iter.into_iter().map(|map| (map.id, map)).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlayerCount {
    Solo,
    Duo,
    Trio,
    Squad,
}

impl PlayerCount {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SOLO" => Some(PlayerCount::Solo),
            "DUO" => Some(PlayerCount::Duo),
            "TRIO" => Some(PlayerCount::Trio),
            "SQUAD" => Some(PlayerCount::Squad),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerCount::Solo => "Solo",
            PlayerCount::Duo => "Duo",
            PlayerCount::Trio => "Trio",
            PlayerCount::Squad => "Squad",
        }
    }
}

/// What a metric's comparable value measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricKind {
    Rounds,
    Kills,
    Score,
    Time,
}

impl MetricKind {
    /// Challenge metric kinds as stored on the challenge catalog. Anything
    /// unrecognised is ranked by round reached.
    pub fn from_challenge_kind(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "KILLS" => MetricKind::Kills,
            "SCORE" => MetricKind::Score,
            _ => MetricKind::Rounds,
        }
    }

    /// Elapsed time ranks ascending; every counting metric ranks descending.
    pub fn lower_is_better(self) -> bool {
        matches!(self, MetricKind::Time)
    }
}

/// One completed challenge run, as read from the challenge completion store.
#[derive(Debug, Clone)]
pub struct ChallengeRun {
    pub id: i64,
    pub user_id: String,
    pub map_id: i64,
    pub challenge_type: String,
    pub metric_kind: MetricKind,
    pub player_count: PlayerCount,
    pub round_reached: i64,
    pub kill_count: Option<i64>,
    pub score: Option<i64>,
    pub is_verified: bool,
    pub completed_at: DateTime<Utc>,
    pub attributes: RunAttributes,
}

/// One Easter-egg completion. Either timing field may be missing.
#[derive(Debug, Clone)]
pub struct EasterEggRun {
    pub id: i64,
    pub user_id: String,
    pub map_id: i64,
    pub easter_egg_id: i64,
    pub easter_egg_name: String,
    pub player_count: PlayerCount,
    pub completion_time_seconds: Option<i64>,
    pub round_reached: Option<i64>,
    pub is_verified: bool,
    pub completed_at: DateTime<Utc>,
    pub attributes: RunAttributes,
}
