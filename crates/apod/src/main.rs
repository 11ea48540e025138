mod cli;
mod config;
mod logging;
mod ui;

use std::process::ExitCode;

use anyhow::Context;
use apod_fetch::{ApodClient, CancellationToken, ImageRecord};
use clap::Parser;
use console::style;
use tracing::info;

use crate::cli::App;
use crate::ui::{Answer, FetchTracker};

const EXIT_CANCELLED: u8 = 130;

fn main() -> ExitCode {
    logging::init();
    let app = App::parse();

    let outcome = tokio::runtime::Runtime::new()
        .context("failed to start the async runtime")
        .and_then(|runtime| {
            let outcome = runtime.block_on(run(&app));
            // An abandoned retry prompt may still be blocked on stdin.
            runtime.shutdown_background();
            outcome
        });

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(app: &App) -> anyhow::Result<ExitCode> {
    let config = config::load(app.config.as_deref(), app.api_key.as_deref())
        .context("failed to load configuration")?;

    let tracker = FetchTracker::new(!app.no_progress);
    let client = ApodClient::with_defaults(config)?.on_progress(tracker.callback());

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let range = app.range();
    loop {
        match client.fetch_images_with_cancel(&range, &cancel).await {
            Ok(images) => {
                tracker.finish();
                print_images(app, &images)?;
                return Ok(ExitCode::SUCCESS);
            }
            Err(err) if err.is_cancelled() => return Ok(cancelled(&tracker)),
            Err(err) if err.offers_retry() => {
                tracker.hide();
                match ui::ask_retry(&err, &cancel).await {
                    Answer::Retry => {
                        info!(error = %err, "retrying on request");
                        tracker.restart();
                    }
                    Answer::Interrupted => return Ok(cancelled(&tracker)),
                    Answer::GiveUp => {
                        tracker.finish();
                        return Err(err.into());
                    }
                }
            }
            Err(err) => {
                tracker.finish();
                return Err(err.into());
            }
        }
    }
}

fn cancelled(tracker: &FetchTracker) -> ExitCode {
    tracker.finish();
    eprintln!("{}", style("Cancelled.").yellow());
    ExitCode::from(EXIT_CANCELLED)
}

fn print_images(app: &App, images: &[ImageRecord]) -> anyhow::Result<()> {
    if app.json {
        let json = serde_json::to_string_pretty(images).context("failed to encode records")?;
        println!("{json}");
        return Ok(());
    }

    println!("{}", ui::records_table(images));
    if app.details {
        println!();
        print!("{}", ui::render_details(images));
    }
    Ok(())
}
