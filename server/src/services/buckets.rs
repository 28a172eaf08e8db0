use crate::models::fact::{Metric, RunFact};
use crate::models::runs::PlayerCount;
use crate::models::world_records::LeaderboardView;
use crate::services::variants::{expand_variants, FilterVariant};
use std::collections::BTreeMap;

/// Identity of one leaderboard that can be won.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    pub map_id: i64,
    pub metric: Metric,
    pub player_count: PlayerCount,
    pub view: LeaderboardView,
    pub variant: FilterVariant,
}

/// Facts grouped per leaderboard. Iteration follows key order, so anything
/// derived from it is reproducible.
#[derive(Debug, Default)]
pub struct Buckets<'a> {
    entries: BTreeMap<BucketKey, Vec<&'a RunFact>>,
}

impl<'a> Buckets<'a> {
    pub fn new() -> Self {
        Buckets::default()
    }

    /// Adds a fact to the open view and, when verified, the verified view of
    /// every filter variant it qualifies for.
    pub fn insert(&mut self, fact: &'a RunFact) {
        let views: &[LeaderboardView] = if fact.is_verified {
            &[LeaderboardView::Open, LeaderboardView::Verified]
        } else {
            &[LeaderboardView::Open]
        };

        for variant in expand_variants(&fact.game_code, &fact.attributes) {
            for view in views {
                let key = BucketKey {
                    map_id: fact.map_id,
                    metric: fact.metric.clone(),
                    player_count: fact.player_count,
                    view: *view,
                    variant: variant.clone(),
                };
                self.entries.entry(key).or_default().push(fact);
            }
        }
    }

    pub fn merge(&mut self, other: Buckets<'a>) {
        for (key, facts) in other.entries {
            self.entries.entry(key).or_default().extend(facts);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &BucketKey) -> Option<&[&'a RunFact]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Each non-empty bucket paired with its winner.
    pub fn winners(&self) -> impl Iterator<Item = (&BucketKey, &'a RunFact)> + '_ {
        self.entries
            .iter()
            .filter_map(|(key, facts)| select_winner(facts).map(|winner| (key, winner)))
    }
}

/// Best fact in a bucket under [`RunFact::rank_cmp`].
pub fn select_winner<'a>(facts: &[&'a RunFact]) -> Option<&'a RunFact> {
    facts.iter().copied().min_by(|a, b| a.rank_cmp(b))
}

/// Buckets for every per-challenge and Easter-egg time metric. Highest round
/// challenges are left to the cross-source merger.
pub fn aggregate(facts: &[RunFact]) -> Buckets<'_> {
    let mut buckets = Buckets::new();
    for fact in facts.iter().filter(|f| !f.metric.is_highest_round_challenge()) {
        buckets.insert(fact);
    }
    buckets
}
