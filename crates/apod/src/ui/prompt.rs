use apod_fetch::{CancellationToken, FetchError};
use console::{Term, style};

/// What the user decided after a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Retry,
    GiveUp,
    Interrupted,
}

/// Offer a manual retry after `err`, giving up the prompt as soon as
/// `cancel` fires.
///
/// The terminal read runs on a blocking thread, so an interrupt does not
/// wait for the user to press Enter.
pub async fn ask_retry(err: &FetchError, cancel: &CancellationToken) -> Answer {
    if cancel.is_cancelled() {
        return Answer::Interrupted;
    }
    let question = format!("{} {err}\nTry again? [y/N] ", style("!").yellow().bold());
    let prompt = tokio::task::spawn_blocking(move || confirm(&question));

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Answer::Interrupted,
        answer = prompt => {
            if answer.unwrap_or(false) {
                Answer::Retry
            } else {
                Answer::GiveUp
            }
        }
    }
}

/// Answers "no" when stderr is not a terminal or the answer cannot be read.
fn confirm(question: &str) -> bool {
    let term = Term::stderr();
    if !term.is_term() || term.write_str(question).is_err() {
        return false;
    }
    term.read_line().map(|answer| is_yes(&answer)).unwrap_or(false)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_retries() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES \n"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[tokio::test]
    async fn interrupt_wins_over_prompt() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = FetchError::Transport {
            message: "connection reset".into(),
            attempts: 3,
        };
        assert_eq!(ask_retry(&err, &cancel).await, Answer::Interrupted);
    }
}
