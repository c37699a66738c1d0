//! Batch coordinate transforms for XML level maps.
//!
//! Each input map is parsed, a [`TransformQueue`] is assembled for it (some
//! transforms, like recentering, depend on the map's own contents), the queue
//! is applied to every positionable item and the map is written to its
//! output path.

use clap::ValueEnum;

pub mod center;
pub mod config;
pub mod driver;
pub mod error;
pub mod pipeline;
pub mod runner;
pub mod transform;
pub mod utils;

// Re-export mapdoc for external use
pub use mapdoc;

pub use center::{Bounds, find_bounds, find_center};
pub use config::{RunConfig, TransformPlan};
pub use driver::transform_map;
pub use error::{ErrorKind, Result, TransformError};
pub use pipeline::{Pipeline, PipelineAssembler};
pub use runner::{DocumentOutcome, DocumentStatus, RunReport, run};
pub use transform::{Transform, TransformQueue};

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
