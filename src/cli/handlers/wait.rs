//! Wait command plumbing
//!
//! A [`WaitSession`] owns the polling context of one `wait` command: the
//! deadline from `--timeout`, cancellation on Ctrl-C, and a spinner in pretty
//! mode. [`WaitOutcome`] reports the result in the selected format.

use std::time::{Duration, Instant};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use serde::Serialize;
use tabled::Tabled;
use tokio::task::JoinHandle;

use crate::cli::OutputFormat;
use crate::cli::args::WaitSettings;
use crate::client::PollRequest;
use crate::client::models::Response;
use crate::error::Result;
use crate::output::formatters::format_duration;
use crate::output::{PrettyPrint, json, table};
use crate::poll::Context;

/// Polling context for a single `wait` command
pub struct WaitSession {
    ctx: Context,
    started: Instant,
    spinner: Option<ProgressBar>,
    interrupt: JoinHandle<()>,
}

impl WaitSession {
    /// Start the deadline clock and listen for Ctrl-C.
    ///
    /// Must be called from within the tokio runtime.
    pub fn start(settings: &WaitSettings, format: OutputFormat, message: impl Into<String>) -> Self {
        let ctx = Context::with_timeout(settings.timeout);

        let token = ctx.token().clone();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling wait");
                token.cancel();
            }
        });

        let message = message.into();
        debug!(
            "{} (interval {:?}, timeout {:?})",
            message, settings.interval, settings.timeout
        );

        Self {
            ctx,
            started: Instant::now(),
            spinner: format.is_interactive().then(|| spinner(message)),
            interrupt,
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Drive `request` to completion and stop the spinner.
    ///
    /// Returns the accepted response and the time spent waiting.
    pub async fn run<T>(self, request: PollRequest<'_, T>) -> Result<(Response<T>, Duration)> {
        let result = request.start(&self.ctx).await;
        let elapsed = self.started.elapsed();

        if let Some(bar) = self.spinner {
            bar.finish_and_clear();
        }
        self.interrupt.abort();

        result.map(|response| (response, elapsed))
    }
}

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// Result of a successful wait
#[derive(Debug, Serialize)]
pub struct WaitOutcome<D> {
    /// One-line summary, e.g. `Cluster 2abc is ready`
    pub summary: String,

    /// HTTP status of the accepted response
    pub status: u16,

    pub elapsed_seconds: f64,

    /// The accepted resource, when the response carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<D>,
}

impl<D> WaitOutcome<D>
where
    D: PrettyPrint + Tabled + Serialize,
{
    pub fn new<T>(summary: impl Into<String>, response: Response<T>, elapsed: Duration) -> Self
    where
        D: From<T>,
    {
        Self {
            summary: summary.into(),
            status: response.status(),
            elapsed_seconds: elapsed.as_secs_f64(),
            resource: response.into_body().map(D::from),
        }
    }

    /// Render the outcome for `format`.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        let rendered = match format {
            OutputFormat::Pretty => {
                let elapsed = format_duration(Duration::from_secs_f64(self.elapsed_seconds));
                let headline = format!("{} {} ({})", "✓".green(), self.summary, elapsed);
                match &self.resource {
                    Some(resource) => format!("{}\n\n{}", headline, resource.pretty()),
                    None => headline,
                }
            }
            OutputFormat::Table => match &self.resource {
                Some(resource) => table::format_record(resource),
                None => self.summary.clone(),
            },
            OutputFormat::Json => json::format_json(self)?,
        };
        Ok(rendered)
    }

    pub fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.render(format)?);
        Ok(())
    }
}
