pub mod database;
pub mod metrics;
pub mod pipeline;
pub mod providers;

pub use database::Database;
pub use pipeline::{ClassificationPipeline, Upload};
