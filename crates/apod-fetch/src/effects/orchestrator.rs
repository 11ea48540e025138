use tokio_util::sync::CancellationToken;
use tracing::warn;
use url::Url;

use crate::core::FallbackState;
use crate::data::{
    FetchTarget, Progress, ProgressCallback, Resolution, RetryBudget, SourceLabel,
};
use crate::effects::fetcher::ResilientFetcher;
use crate::effects::http::HttpClient;
use crate::effects::sleep::Sleeper;
use crate::error::{FetchError, Result};

/// Runs the primary leg and, for scoped targets, the mirror leg after it.
pub struct Orchestrator<C: HttpClient, S: Sleeper> {
    fetcher: ResilientFetcher<C, S>,
    mirror_url: Url,
    primary: RetryBudget,
    mirror: RetryBudget,
}

impl<C: HttpClient, S: Sleeper> Orchestrator<C, S> {
    pub fn new(
        fetcher: ResilientFetcher<C, S>,
        mirror_url: Url,
        primary: RetryBudget,
        mirror: RetryBudget,
    ) -> Self {
        Self {
            fetcher,
            mirror_url,
            primary,
            mirror,
        }
    }

    /// Replace the sleeper used between attempts.
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> Orchestrator<C, T> {
        Orchestrator {
            fetcher: self.fetcher.with_sleeper(sleeper),
            mirror_url: self.mirror_url,
            primary: self.primary,
            mirror: self.mirror,
        }
    }

    #[must_use]
    pub fn on_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.fetcher = self.fetcher.on_progress(on_progress);
        self
    }

    /// Produce a raw payload for `target`, falling back to the mirror when
    /// the primary leg fails on a date-scoped target.
    ///
    /// When both legs fail the mirror's error is returned.
    pub async fn resolve(
        &self,
        target: &FetchTarget,
        cancel: &CancellationToken,
    ) -> Result<Resolution> {
        let mut state = FallbackState::Primary;
        let mut leg = SourceLabel::Primary;

        loop {
            let outcome = self.run_leg(leg, target, cancel).await;
            state = state.next(
                outcome.as_ref().err().map(FetchError::kind),
                target.is_default(),
            );

            match state {
                FallbackState::Mirror => {
                    if let Err(ref err) = outcome {
                        warn!(error = %err, "primary source exhausted, falling back to mirror");
                    }
                    self.fetcher
                        .notify_progress(Progress::falling_back(self.mirror.attempts));
                    leg = SourceLabel::Mirror;
                }
                _ => return outcome.map(|payload| Resolution { payload, source: leg }),
            }
        }
    }

    async fn run_leg(
        &self,
        leg: SourceLabel,
        target: &FetchTarget,
        cancel: &CancellationToken,
    ) -> Result<serde_json::Value> {
        match leg {
            SourceLabel::Primary => {
                self.fetcher
                    .fetch(target.locator().as_str(), self.primary, leg, cancel)
                    .await
            }
            SourceLabel::Mirror => {
                self.fetcher
                    .fetch(self.mirror_url.as_str(), self.mirror, leg, cancel)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::core::build_target;
    use crate::data::{PipelineConfig, RangeInput};
    use crate::effects::fetcher::tests::{RecordingSleeper, ScriptedClient};
    use crate::error::ErrorKind;

    const MIRROR: &str = "https://cdn.jsdelivr.net/gh/GCA-Classroom/apod/data.json";

    fn orchestrator(
        script: ScriptedClient,
    ) -> (
        Orchestrator<Arc<ScriptedClient>, Arc<RecordingSleeper>>,
        Arc<ScriptedClient>,
        Arc<Mutex<Vec<Progress>>>,
    ) {
        let client = Arc::new(script);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let fetcher = ResilientFetcher::new(client.clone())
            .with_sleeper(Arc::new(RecordingSleeper::new()))
            .on_progress(Arc::new(move |p: &Progress| sink.lock().unwrap().push(*p)));
        let orchestrator = Orchestrator::new(
            fetcher,
            Url::parse(MIRROR).unwrap(),
            RetryBudget::primary(),
            RetryBudget::mirror(),
        );
        (orchestrator, client, seen)
    }

    fn target(start: &str, end: &str) -> FetchTarget {
        let endpoints = PipelineConfig::default().endpoints().unwrap();
        build_target(&RangeInput::new(start, end), &endpoints).unwrap()
    }

    #[tokio::test]
    async fn primary_success_skips_mirror() {
        let script = ScriptedClient::new().status(200, "[]");
        let (orchestrator, client, seen) = orchestrator(script);

        let resolution = orchestrator
            .resolve(&target("2024-01-01", "2024-01-03"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(resolution.source, SourceLabel::Primary);
        assert_eq!(client.requests().len(), 1);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn exhausted_primary_falls_back_to_mirror() {
        let script = ScriptedClient::new()
            .status(503, "")
            .status(503, "")
            .status(503, "")
            .status(200, "[]");
        let (orchestrator, client, seen) = orchestrator(script);

        let resolution = orchestrator
            .resolve(&target("2024-01-01", "2024-01-03"), &CancellationToken::new())
            .await
            .unwrap();

        assert!(resolution.from_mirror());
        let requests = client.requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[3], MIRROR);
        assert!(seen.lock().unwrap().contains(&Progress::falling_back(2)));
    }

    #[tokio::test]
    async fn mirror_error_supersedes_primary_error() {
        let script = ScriptedClient::new()
            .status(404, "unknown date")
            .transport_error("dns")
            .transport_error("dns");
        let (orchestrator, _, _) = orchestrator(script);

        let err = orchestrator
            .resolve(&target("2024-01-01", ""), &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TransportError);
        assert_eq!(err.attempts(), 2);
    }

    #[tokio::test]
    async fn default_target_has_no_fallback() {
        let script = ScriptedClient::new()
            .status(500, "")
            .status(500, "")
            .status(500, "")
            .status(200, "[]");
        let (orchestrator, client, _) = orchestrator(script);

        let err = orchestrator
            .resolve(&target("", ""), &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::HttpError);
        assert_eq!(client.requests().len(), 3);
    }

    #[tokio::test]
    async fn cancelled_primary_does_not_fall_back() {
        let token = CancellationToken::new();
        token.cancel();
        let (orchestrator, client, _) = orchestrator(ScriptedClient::new());

        let err = orchestrator
            .resolve(&target("2024-01-01", "2024-01-02"), &token)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert!(client.requests().is_empty());
    }
}
