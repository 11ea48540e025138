use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::core::{build_target, filter_images, normalize, refilter};
use crate::data::{Endpoints, PipelineConfig, ProgressCallback, RangeInput};
use crate::effects::fetcher::ResilientFetcher;
use crate::effects::http::HttpClient;
use crate::effects::orchestrator::Orchestrator;
use crate::effects::sleep::{Sleeper, TokioSleeper};
use crate::error::{FetchOutcome, Result};

/// Entry point of the pipeline.
///
/// Holds validated endpoints and the injected I/O; every call to
/// [`fetch_images`](Self::fetch_images) runs independently.
///
/// # Examples
///
/// ```no_run
/// use apod_fetch::{ApodClient, PipelineConfig, RangeInput};
///
/// # async fn run() -> apod_fetch::Result<()> {
/// let client = ApodClient::with_defaults(PipelineConfig::default())?;
/// let images = client
///     .fetch_images(&RangeInput::new("2024-01-01", "2024-01-07"))
///     .await?;
/// for image in &images {
///     println!("{} {}", image.date, image.title);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ApodClient<C: HttpClient, S: Sleeper = TokioSleeper> {
    endpoints: Endpoints,
    orchestrator: Orchestrator<C, S>,
}

impl<C: HttpClient> ApodClient<C> {
    /// Validate `config` and build a client around `http`.
    pub fn new(config: PipelineConfig, http: C) -> Result<Self> {
        let endpoints = config.endpoints()?;
        let orchestrator = Orchestrator::new(
            ResilientFetcher::new(http),
            endpoints.mirror_url.clone(),
            config.primary,
            config.mirror,
        );
        Ok(Self {
            endpoints,
            orchestrator,
        })
    }
}

#[cfg(feature = "reqwest")]
impl ApodClient<crate::effects::http::ReqwestClient> {
    /// Build a client backed by reqwest with the configured request timeout.
    pub fn with_defaults(config: PipelineConfig) -> Result<Self> {
        let http = crate::effects::http::ReqwestClient::new(config.request_timeout())
            .map_err(|e| crate::error::FetchError::InvalidConfig(e.to_string()))?;
        Self::new(config, http)
    }
}

impl<C: HttpClient, S: Sleeper> ApodClient<C, S> {
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> ApodClient<C, T> {
        ApodClient {
            endpoints: self.endpoints,
            orchestrator: self.orchestrator.with_sleeper(sleeper),
        }
    }

    /// Register a callback for retry and fallback notifications.
    #[must_use]
    pub fn on_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.orchestrator = self.orchestrator.on_progress(on_progress);
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Run the pipeline for `input` without cancellation.
    pub async fn fetch_images(&self, input: &RangeInput) -> FetchOutcome {
        self.fetch_images_with_cancel(input, &CancellationToken::new())
            .await
    }

    /// Run the pipeline for `input`, stopping early once `cancel` fires.
    ///
    /// Records from the mirror are narrowed to the requested dates; records
    /// from either source are narrowed to still images.
    pub async fn fetch_images_with_cancel(
        &self,
        input: &RangeInput,
        cancel: &CancellationToken,
    ) -> FetchOutcome {
        let target = build_target(input, &self.endpoints)?;
        debug!(kind = ?target.kind(), range = ?target.range(), "target built");

        let resolution = self.orchestrator.resolve(&target, cancel).await?;
        let from_mirror = resolution.from_mirror();
        let source = resolution.source;

        let mut records = normalize(resolution.payload)?;
        if from_mirror {
            records = refilter(records, target.range())?;
        }
        let images = filter_images(records)?;

        info!(count = images.len(), %source, "images fetched");
        Ok(images)
    }
}
