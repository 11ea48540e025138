use crate::data::SourceLabel;
use crate::error::ErrorKind;

/// Decision table for the primary → mirror cascade.
///
/// ```text
/// Primary ──ok──────────────────────────▶ Succeeded(Primary)
/// Primary ──err, scoped target──────────▶ Mirror
/// Primary ──err, default target/cancel──▶ Failed
/// Mirror  ──ok──────────────────────────▶ Succeeded(Mirror)
/// Mirror  ──err─────────────────────────▶ Failed
/// ```
///
/// Terminal states ignore further input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackState {
    Primary,
    Mirror,
    Succeeded(SourceLabel),
    Failed,
}

impl FallbackState {
    /// Advance after a leg finished. `failure` is `None` when the leg succeeded.
    pub fn next(self, failure: Option<ErrorKind>, target_is_default: bool) -> Self {
        match (self, failure) {
            (FallbackState::Primary, None) => FallbackState::Succeeded(SourceLabel::Primary),
            (FallbackState::Primary, Some(ErrorKind::Cancelled)) => FallbackState::Failed,
            (FallbackState::Primary, Some(_)) if target_is_default => FallbackState::Failed,
            (FallbackState::Primary, Some(_)) => FallbackState::Mirror,
            (FallbackState::Mirror, None) => FallbackState::Succeeded(SourceLabel::Mirror),
            (FallbackState::Mirror, Some(_)) => FallbackState::Failed,
            (terminal, _) => terminal,
        }
    }

    /// The leg this state runs next, if any.
    pub fn leg(self) -> Option<SourceLabel> {
        match self {
            FallbackState::Primary => Some(SourceLabel::Primary),
            FallbackState::Mirror => Some(SourceLabel::Mirror),
            FallbackState::Succeeded(_) | FallbackState::Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.leg().is_none()
    }
}
