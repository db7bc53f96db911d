pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::feed_pipeline::FeedPipeline;
pub use config::cli::LocalStorage;
pub use core::etl::ConversionEngine;
pub use domain::model::{CsvArtifact, InputSource, OutputTable, CANONICAL_SCHEMA};
pub use utils::error::{CatalogError, Result};
