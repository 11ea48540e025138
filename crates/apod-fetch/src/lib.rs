//! Resilient fetching and normalization of astronomy picture of the day records.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and types
//! - [`core`] - Pure transformations
//! - [`effects`] - I/O operations with trait abstraction
//!
//! # Pipeline
//!
//! Range building → primary fetch with backoff → mirror fallback →
//! normalization → mirror refilter → image filter.
//!
//! - **Injected I/O**: network and sleeping sit behind [`HttpClient`] and [`Sleeper`]
//! - **Mechanism-Only**: the caller owns presentation; progress is reported through a callback

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use core::{
    FallbackState, build_target, filter_images, is_retryable_status, normalize, refilter,
    retry_delay, validate_range,
};
pub use data::{
    DateRange, Endpoints, FetchPhase, FetchTarget, ImageRecord, PipelineConfig, Progress,
    ProgressCallback, RangeInput, Resolution, RetryBudget, SourceLabel, TargetKind,
};
pub use effects::{
    ApodClient, HttpClient, HttpResponse, Orchestrator, ResilientFetcher, Sleeper, TokioSleeper,
};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{ErrorKind, FetchError, FetchOutcome, Result};

pub use tokio_util::sync::CancellationToken;
