pub mod world_records;
