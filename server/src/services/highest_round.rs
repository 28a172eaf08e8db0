use crate::models::fact::{Metric, RunFact, RunSource};
use crate::models::runs::{ChallengeRun, EasterEggRun, MapContext};
use crate::services::buckets::Buckets;

/// A completion that can set the highest round reached on its map.
///
/// Any run kind implementing this competes on the same leaderboard; the
/// merge itself never looks at where a fact came from.
pub trait RoundContribution {
    fn round_fact(&self, map: &MapContext) -> Option<RunFact>;
}

impl RoundContribution for ChallengeRun {
    fn round_fact(&self, map: &MapContext) -> Option<RunFact> {
        let fact = self.to_fact(map);
        if !fact.metric.is_highest_round_challenge() {
            return None;
        }
        Some(RunFact {
            metric: Metric::HighestRound,
            value: self.round_reached,
            ..fact
        })
    }
}

impl RoundContribution for EasterEggRun {
    fn round_fact(&self, map: &MapContext) -> Option<RunFact> {
        let round = self.round_reached?;
        Some(RunFact {
            source: RunSource::EasterEgg(self.id),
            user_id: self.user_id.clone(),
            map_id: map.id,
            game_code: map.game_code.clone(),
            metric: Metric::HighestRound,
            player_count: self.player_count,
            value: round,
            is_verified: self.is_verified,
            completed_at: self.completed_at,
            easter_egg_name: None,
            attributes: self.attributes.clone(),
        })
    }
}

/// Highest round buckets across every source kind. Each bucket keeps all of
/// its contributions; the winner is picked at reduction time.
pub fn merge_highest_round(round_facts: &[RunFact]) -> Buckets<'_> {
    let mut buckets = Buckets::new();
    for fact in round_facts {
        debug_assert_eq!(fact.metric, Metric::HighestRound);
        buckets.insert(fact);
    }
    buckets
}
