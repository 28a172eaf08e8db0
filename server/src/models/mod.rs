pub mod attributes;
pub mod fact;
pub mod runs;
pub mod world_records;
