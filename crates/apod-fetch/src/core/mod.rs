//! Pure transformations and decision logic for the fetch pipeline.
//!
//! Nothing in this module performs I/O; every function here is testable
//! without a network or a clock.

mod fallback;
mod media;
mod normalize;
mod range;
mod refilter;
mod retry;

pub use fallback::FallbackState;
pub use media::{filter_images, is_image};
pub use normalize::normalize;
pub use range::{MAX_RANGE_DAYS, build_target, validate_range};
pub use refilter::refilter;
pub use retry::{is_retryable_status, retry_delay};
