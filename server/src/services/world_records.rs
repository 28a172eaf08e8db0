use crate::error::AppError;
use crate::models::fact::{metric_label, RunFact};
use crate::models::runs::MapCatalog;
use crate::models::world_records::{WorldRecordDetail, WorldRecordSummary, WorldRecordsDetailed};
use crate::services::buckets::{aggregate, BucketKey, Buckets};
use crate::services::fact_loader::load_facts;
use crate::services::highest_round::merge_highest_round;
use crate::store::FactStore;

/// Counts every bucket `user_id` wins. A win adds to `world_records`, and
/// independently to `verified_world_records` when the winning run is
/// verified, so one run can count several times across views and variants.
pub fn reduce(user_id: &str, catalog: &MapCatalog, buckets: &Buckets<'_>) -> WorldRecordsDetailed {
    let mut result = WorldRecordsDetailed {
        world_records: 0,
        verified_world_records: 0,
        details: Vec::new(),
    };

    for (key, winner) in buckets.winners() {
        if !winner.user_id.eq_ignore_ascii_case(user_id) {
            continue;
        }
        result.world_records += 1;
        if winner.is_verified {
            result.verified_world_records += 1;
        }
        // facts are only built for catalogued maps
        if let Some(detail) = describe(catalog, key, winner) {
            result.details.push(detail);
        }
    }

    result
}

fn describe(catalog: &MapCatalog, key: &BucketKey, winner: &RunFact) -> Option<WorldRecordDetail> {
    let map = catalog.get(key.map_id)?;
    Some(WorldRecordDetail {
        map_slug: map.slug.clone(),
        map_name: map.name.clone(),
        game_code: map.game_code.clone(),
        metric_label: metric_label(key.metric.tag()),
        easter_egg_name: winner.easter_egg_name.clone(),
        party_size: key.player_count.label().to_string(),
        view: key.view,
        filter_labels: key.variant.labels(),
        value: winner.value,
        source: winner.source.kind_name().to_string(),
        is_verified: winner.is_verified,
    })
}

/// Recomputes every leaderboard from the store and reports the ones
/// `user_id` leads.
pub fn compute_world_records_detailed(
    store: &impl FactStore,
    user_id: &str,
) -> Result<WorldRecordsDetailed, AppError> {
    let set = load_facts(store)?;

    let mut buckets = aggregate(&set.facts);
    buckets.merge(merge_highest_round(&set.round_facts));

    let result = reduce(user_id, &set.catalog, &buckets);
    tracing::debug!(
        user_id,
        buckets = buckets.len(),
        world_records = result.world_records,
        verified_world_records = result.verified_world_records,
        "computed world records"
    );
    Ok(result)
}

pub fn compute_world_records(store: &impl FactStore, user_id: &str) -> Result<WorldRecordSummary, AppError> {
    Ok(compute_world_records_detailed(store, user_id)?.summary())
}
