pub mod buckets;
pub mod fact_loader;
pub mod highest_round;
pub mod variants;
pub mod world_records;
