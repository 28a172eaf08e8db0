use crate::error::AppError;
use crate::models::fact::{Metric, RunFact, RunSource};
use crate::models::runs::{ChallengeRun, EasterEggRun, MapCatalog, MapContext, MetricKind};
use crate::services::highest_round::RoundContribution;
use crate::store::FactStore;

/// Everything one world record computation ranks.
#[derive(Debug, Default)]
pub struct FactSet {
    pub catalog: MapCatalog,
    /// Per-challenge and Easter-egg time facts.
    pub facts: Vec<RunFact>,
    /// Contributions to the cross-source highest round leaderboard.
    pub round_facts: Vec<RunFact>,
}

impl ChallengeRun {
    /// The comparable value depends on what the challenge measures.
    pub fn metric_value(&self) -> i64 {
        match self.metric_kind {
            MetricKind::Kills => self.kill_count.unwrap_or(0),
            MetricKind::Score => self.score.unwrap_or(0),
            MetricKind::Rounds | MetricKind::Time => self.round_reached,
        }
    }

    pub fn to_fact(&self, map: &MapContext) -> RunFact {
        RunFact {
            source: RunSource::Challenge(self.id),
            user_id: self.user_id.clone(),
            map_id: map.id,
            game_code: map.game_code.clone(),
            metric: Metric::Challenge {
                challenge_type: self.challenge_type.clone(),
                kind: self.metric_kind,
            },
            player_count: self.player_count,
            value: self.metric_value(),
            is_verified: self.is_verified,
            completed_at: self.completed_at,
            easter_egg_name: None,
            attributes: self.attributes.clone(),
        }
    }
}

impl EasterEggRun {
    /// Completions without a recorded duration cannot compete on time.
    pub fn time_fact(&self, map: &MapContext) -> Option<RunFact> {
        let seconds = self.completion_time_seconds?;
        Some(RunFact {
            source: RunSource::EasterEgg(self.id),
            user_id: self.user_id.clone(),
            map_id: map.id,
            game_code: map.game_code.clone(),
            metric: Metric::EasterEggTime {
                easter_egg_id: self.easter_egg_id,
            },
            player_count: self.player_count,
            value: seconds,
            is_verified: self.is_verified,
            completed_at: self.completed_at,
            easter_egg_name: Some(self.easter_egg_name.clone()),
            attributes: self.attributes.clone(),
        })
    }
}

/// Reads both completion stores and normalizes them against the map catalog.
/// Runs on unknown maps are dropped.
pub fn load_facts(store: &impl FactStore) -> Result<FactSet, AppError> {
    let catalog: MapCatalog = store.map_catalog()?.into_iter().collect();
    let challenge_runs = store.challenge_runs()?;
    let easter_egg_runs = store.easter_egg_runs()?;

    let mut set = FactSet {
        facts: Vec::with_capacity(challenge_runs.len() + easter_egg_runs.len()),
        ..Default::default()
    };
    let mut dropped = 0usize;

    for run in &challenge_runs {
        let Some(map) = catalog.get(run.map_id) else {
            tracing::debug!(run_id = run.id, map_id = run.map_id, "dropping challenge run on unknown map");
            dropped += 1;
            continue;
        };
        set.facts.push(run.to_fact(map));
        set.round_facts.extend(run.round_fact(map));
    }

    for run in &easter_egg_runs {
        let Some(map) = catalog.get(run.map_id) else {
            tracing::debug!(run_id = run.id, map_id = run.map_id, "dropping easter egg run on unknown map");
            dropped += 1;
            continue;
        };
        set.facts.extend(run.time_fact(map));
        set.round_facts.extend(run.round_fact(map));
    }

    tracing::debug!(
        maps = catalog.len(),
        facts = set.facts.len(),
        round_facts = set.round_facts.len(),
        dropped,
        "loaded run facts"
    );
    set.catalog = catalog;
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attributes::RunAttributes;
    use crate::models::runs::PlayerCount;
    use crate::store::Snapshot;
    use chrono::{TimeZone, Utc};

    fn map(id: i64) -> MapContext {
        MapContext {
            id,
            slug: format!("map-{id}"),
            name: format!("Map {id}"),
            game_code: "BO2".into(),
        }
    }

    fn challenge(id: i64, map_id: i64, challenge_type: &str, kind: MetricKind) -> ChallengeRun {
        ChallengeRun {
            id,
            user_id: "user".into(),
            map_id,
            challenge_type: challenge_type.into(),
            metric_kind: kind,
            player_count: PlayerCount::Solo,
            round_reached: 31,
            kill_count: Some(450),
            score: Some(120_000),
            is_verified: false,
            completed_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            attributes: RunAttributes::default(),
        }
    }

    fn egg(id: i64, seconds: Option<i64>, round: Option<i64>) -> EasterEggRun {
        EasterEggRun {
            id,
            user_id: "user".into(),
            map_id: 1,
            easter_egg_id: 7,
            easter_egg_name: "Mob of the Dead".into(),
            player_count: PlayerCount::Duo,
            completion_time_seconds: seconds,
            round_reached: round,
            is_verified: true,
            completed_at: Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap(),
            attributes: RunAttributes::default(),
        }
    }

    #[test]
    fn test_challenge_value_follows_metric_kind() {
        assert_eq!(challenge(1, 1, "NO_DOWNS", MetricKind::Rounds).metric_value(), 31);
        assert_eq!(challenge(1, 1, "MOST_KILLS", MetricKind::Kills).metric_value(), 450);
        assert_eq!(challenge(1, 1, "HIGHEST_SCORE", MetricKind::Score).metric_value(), 120_000);
    }

    #[test]
    fn test_dangling_map_is_dropped() {
        let snapshot = Snapshot {
            maps: vec![map(1)],
            challenge_runs: vec![
                challenge(1, 1, "NO_DOWNS", MetricKind::Rounds),
                challenge(2, 99, "NO_DOWNS", MetricKind::Rounds),
            ],
            easter_egg_runs: vec![],
        };
        let set = load_facts(&snapshot).unwrap();
        assert_eq!(set.facts.len(), 1);
        assert_eq!(set.facts[0].source, RunSource::Challenge(1));
        assert_eq!(set.facts[0].game_code, "BO2");
    }

    #[test]
    fn test_egg_without_duration_only_contributes_rounds() {
        let snapshot = Snapshot {
            maps: vec![map(1)],
            challenge_runs: vec![],
            easter_egg_runs: vec![egg(1, None, Some(22)), egg(2, Some(3000), None)],
        };
        let set = load_facts(&snapshot).unwrap();
        assert_eq!(set.facts.len(), 1);
        assert_eq!(set.facts[0].source, RunSource::EasterEgg(2));
        assert_eq!(set.facts[0].value, 3000);
        assert_eq!(set.round_facts.len(), 1);
        assert_eq!(set.round_facts[0].source, RunSource::EasterEgg(1));
        assert_eq!(set.round_facts[0].value, 22);
    }

    #[test]
    fn test_highest_round_challenges_feed_the_round_merger() {
        let snapshot = Snapshot {
            maps: vec![map(1)],
            challenge_runs: vec![
                challenge(1, 1, "HIGHEST_ROUND", MetricKind::Rounds),
                challenge(2, 1, "NO_PERKS", MetricKind::Rounds),
            ],
            easter_egg_runs: vec![],
        };
        let set = load_facts(&snapshot).unwrap();
        assert_eq!(set.facts.len(), 2);
        assert_eq!(set.round_facts.len(), 1);
        assert_eq!(set.round_facts[0].metric, Metric::HighestRound);
    }
}
