use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::core::{is_retryable_status, retry_delay};
use crate::data::{Progress, ProgressCallback, RetryBudget, SourceLabel};
use crate::effects::http::{HttpClient, HttpResponse};
use crate::effects::sleep::{Sleeper, TokioSleeper};
use crate::error::{FetchError, Result};

const BODY_EXCERPT_CHARS: usize = 200;

/// GET with bounded retries and exponential backoff against a single URL.
///
/// Server errors, rate limiting, transport failures and undecodable bodies
/// are retried until the budget runs out; every other status stops at once.
pub struct ResilientFetcher<C: HttpClient, S: Sleeper = TokioSleeper> {
    client: C,
    sleeper: S,
    on_progress: Option<ProgressCallback>,
}

enum AttemptError {
    Retryable(FetchError),
    Fatal(FetchError),
}

impl<C: HttpClient> ResilientFetcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            on_progress: None,
        }
    }
}

impl<C: HttpClient, S: Sleeper> ResilientFetcher<C, S> {
    /// Replace the sleeper used between attempts.
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> ResilientFetcher<C, T> {
        ResilientFetcher {
            client: self.client,
            sleeper,
            on_progress: self.on_progress,
        }
    }

    /// Set the progress callback, invoked before every retry.
    #[must_use]
    pub fn on_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    pub(crate) fn notify_progress(&self, progress: Progress) {
        if let Some(ref callback) = self.on_progress {
            callback(&progress);
        }
    }

    /// Fetch `url` and decode its body as JSON.
    ///
    /// `cancel` is checked before each attempt and before each backoff, and
    /// interrupts a backoff in progress.
    pub async fn fetch(
        &self,
        url: &str,
        budget: RetryBudget,
        source: SourceLabel,
        cancel: &CancellationToken,
    ) -> Result<Value> {
        let total = budget.attempts.max(1);
        let mut attempt = 1;

        loop {
            if cancel.is_cancelled() {
                return Err(FetchError::Cancelled {
                    attempts: attempt - 1,
                });
            }
            if attempt > 1 {
                self.notify_progress(Progress::retrying(attempt, total, source));
            }

            debug!(%source, attempt, total, url = %redact(url), "requesting");

            let err = match self.attempt(url).await {
                Ok(payload) => {
                    debug!(%source, attempt, "request succeeded");
                    return Ok(payload);
                }
                Err(AttemptError::Fatal(err)) => {
                    warn!(%source, attempt, error = %err, "request failed, not retrying");
                    return Err(err.with_attempts(attempt));
                }
                Err(AttemptError::Retryable(err)) => err,
            };

            if attempt >= total {
                warn!(%source, attempt, error = %err, "retry budget exhausted");
                return Err(err.with_attempts(attempt));
            }

            let delay = retry_delay(attempt - 1, budget.base_delay());
            warn!(%source, attempt, total, ?delay, error = %err, "request failed, backing off");

            if cancel.is_cancelled() {
                return Err(FetchError::Cancelled { attempts: attempt });
            }
            tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(FetchError::Cancelled { attempts: attempt });
                }
                _ = self.sleeper.sleep(delay) => {}
            }

            attempt += 1;
        }
    }

    async fn attempt(&self, url: &str) -> std::result::Result<Value, AttemptError> {
        let response = self.client.get(url).await.map_err(|e| {
            AttemptError::Retryable(FetchError::Transport {
                message: e.to_string(),
                attempts: 0,
            })
        })?;

        if !response.is_success() {
            let err = FetchError::Http {
                status: response.status,
                message: body_excerpt(&response),
                attempts: 0,
            };
            return Err(if is_retryable_status(response.status) {
                AttemptError::Retryable(err)
            } else {
                AttemptError::Fatal(err)
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| {
            AttemptError::Retryable(FetchError::Transport {
                message: format!("invalid JSON body: {e}"),
                attempts: 0,
            })
        })
    }
}

fn body_excerpt(response: &HttpResponse) -> String {
    let text = String::from_utf8_lossy(&response.body);
    let text = text.trim();
    if text.is_empty() {
        return "(empty body)".to_string();
    }
    let mut excerpt: String = text.chars().take(BODY_EXCERPT_CHARS).collect();
    if text.chars().count() > BODY_EXCERPT_CHARS {
        excerpt.push('…');
    }
    excerpt
}

/// Hide the credential when a locator is logged.
fn redact(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    if !parsed.query_pairs().any(|(k, _)| k == "api_key") {
        return parsed.into();
    }
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "api_key" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.into()
}
