use crate::models::attributes::RunAttributes;
use crate::models::runs::{MetricKind, PlayerCount};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Challenge type reserved for the cross-source highest round leaderboard.
pub const HIGHEST_ROUND: &str = "HIGHEST_ROUND";
pub const EASTER_EGG_TIME: &str = "EASTER_EGG_TIME";

const METRIC_LABELS: &[(&str, &str)] = &[
    (HIGHEST_ROUND, "Highest Round"),
    ("NO_DOWNS", "No Downs"),
    ("NO_PERKS", "No Perks"),
    ("NO_PACK", "No Pack-a-Punch"),
    ("STARTING_ROOM", "Starting Room"),
    ("FIRST_ROOM", "First Room"),
    ("ONE_BOX", "One Box"),
    ("NO_POWER", "No Power"),
    ("NO_JUG", "No Jugg"),
    ("NO_ARMOR", "No Armor"),
    ("NO_ATM", "No ATM"),
    ("ROUND_30_SPEED", "Round 30 Speedrun"),
    ("MOST_KILLS", "Most Kills"),
    ("HIGHEST_SCORE", "Highest Score"),
    (EASTER_EGG_TIME, "Fastest Easter Egg"),
];

/// Display label for a metric tag, falling back to the tag itself.
pub fn metric_label(tag: &str) -> String {
    METRIC_LABELS
        .iter()
        .find(|(known, _)| *known == tag)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| tag.to_string())
}

/// The thing a leaderboard ranks. The kind is part of the identity so a
/// bucket can never mix ascending and descending values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Challenge {
        challenge_type: String,
        kind: MetricKind,
    },
    EasterEggTime {
        easter_egg_id: i64,
    },
    HighestRound,
}

impl Metric {
    pub fn kind(&self) -> MetricKind {
        match self {
            Metric::Challenge { kind, .. } => *kind,
            Metric::EasterEggTime { .. } => MetricKind::Time,
            Metric::HighestRound => MetricKind::Rounds,
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Metric::Challenge { challenge_type, .. } => challenge_type,
            Metric::EasterEggTime { .. } => EASTER_EGG_TIME,
            Metric::HighestRound => HIGHEST_ROUND,
        }
    }

    /// A `HIGHEST_ROUND` challenge fact. Those are ranked by the cross-source
    /// merger, never by the per-challenge aggregation.
    pub fn is_highest_round_challenge(&self) -> bool {
        matches!(self, Metric::Challenge { challenge_type, .. } if challenge_type == HIGHEST_ROUND)
    }
}

/// Which store a fact came from, with its row id. Orders challenge rows
/// before Easter-egg rows, then by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RunSource {
    Challenge(i64),
    EasterEgg(i64),
}

impl RunSource {
    pub fn kind_name(self) -> &'static str {
        match self {
            RunSource::Challenge(_) => "challenge",
            RunSource::EasterEgg(_) => "easter_egg",
        }
    }
}

/// A normalized, immutable snapshot of one completion, ready to be ranked.
#[derive(Debug, Clone)]
pub struct RunFact {
    pub source: RunSource,
    pub user_id: String,
    pub map_id: i64,
    pub game_code: String,
    pub metric: Metric,
    pub player_count: PlayerCount,
    pub value: i64,
    pub is_verified: bool,
    pub completed_at: DateTime<Utc>,
    pub easter_egg_name: Option<String>,
    pub attributes: RunAttributes,
}

impl RunFact {
    /// Leaderboard order between two facts of the same metric:
    /// `Less` means `self` places ahead of `other`.
    ///
    /// Ties on value go to the earlier completion, then to the source order
    /// of [`RunSource`], so the result never depends on fetch order.
    pub fn rank_cmp(&self, other: &RunFact) -> Ordering {
        let by_value = if self.metric.kind().lower_is_better() {
            self.value.cmp(&other.value)
        } else {
            other.value.cmp(&self.value)
        };
        by_value
            .then_with(|| self.completed_at.cmp(&other.completed_at))
            .then_with(|| self.source.cmp(&other.source))
    }
}
