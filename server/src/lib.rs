pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;
pub mod telemetry;
pub mod validation;

pub use services::world_records::{compute_world_records, compute_world_records_detailed};
