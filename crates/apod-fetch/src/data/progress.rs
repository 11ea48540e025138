use std::fmt;
use std::sync::Arc;

use super::sources::SourceLabel;

/// What the pipeline is doing when it reports progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// A failed attempt is being retried after its backoff.
    Retrying,

    /// The primary leg is exhausted and the mirror leg is starting.
    FallingBack,
}

/// Status reported to the caller between attempts.
///
/// `attempt` is 1-indexed and counts within the current leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub phase: FetchPhase,
    pub attempt: u32,
    pub total_attempts: u32,
    pub source: SourceLabel,
}

impl Progress {
    pub fn retrying(attempt: u32, total_attempts: u32, source: SourceLabel) -> Self {
        Self {
            phase: FetchPhase::Retrying,
            attempt,
            total_attempts,
            source,
        }
    }

    pub fn falling_back(total_attempts: u32) -> Self {
        Self {
            phase: FetchPhase::FallingBack,
            attempt: 1,
            total_attempts,
            source: SourceLabel::Mirror,
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            FetchPhase::Retrying => write!(
                f,
                "Retrying {}… (attempt {} of {})",
                self.source, self.attempt, self.total_attempts
            ),
            FetchPhase::FallingBack => write!(f, "API unavailable, loading mirror data…"),
        }
    }
}

/// Callback invoked with every [`Progress`] report.
pub type ProgressCallback = Arc<dyn Fn(&Progress) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_retry_status() {
        let p = Progress::retrying(2, 3, SourceLabel::Primary);
        assert_eq!(p.to_string(), "Retrying primary… (attempt 2 of 3)");
    }

    #[test]
    fn fallback_starts_mirror_leg() {
        let p = Progress::falling_back(2);
        assert_eq!(p.source, SourceLabel::Mirror);
        assert_eq!(p.attempt, 1);
        assert_eq!(p.to_string(), "API unavailable, loading mirror data…");
    }
}
