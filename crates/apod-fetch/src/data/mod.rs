//! Data layer: immutable types for request targets, records, configuration and progress.

pub mod options;
pub mod progress;
pub mod range;
pub mod record;
pub mod sources;

pub use options::{Endpoints, PipelineConfig, RetryBudget};
pub use progress::{FetchPhase, Progress, ProgressCallback};
pub use range::{DateRange, FetchTarget, RangeInput, TargetKind};
pub use record::ImageRecord;
pub use sources::{Resolution, SourceLabel};
