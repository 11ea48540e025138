//! I/O operations and effectful computations for the fetch pipeline.
//!
//! Network access and waiting are behind [`HttpClient`] and [`Sleeper`] so
//! the retry and fallback logic can run against fakes.

mod client;
mod fetcher;
mod http;
mod orchestrator;
mod sleep;

pub use client::ApodClient;
pub use fetcher::ResilientFetcher;
pub use http::{HttpClient, HttpResponse};
pub use orchestrator::Orchestrator;
pub use sleep::{Sleeper, TokioSleeper};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
