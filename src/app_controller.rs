use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::analysis::{AnalysisRequester, MovieAnalysis};
use crate::app_config::Config;
use crate::errors::AnalysisError;
use crate::providers::gemini::Gemini;
use crate::providers::Provider;
use crate::render::{render_state, OutputFormat};
use crate::session::SearchSession;

// @module: Application controller for movie analysis

/// Commands recognised by the interactive loop
const QUIT_COMMANDS: [&str; 3] = [":q", ":quit", ":exit"];
const RESET_COMMANDS: [&str; 2] = [":reset", ":home"];

type Completion = (u64, Result<MovieAnalysis, AnalysisError>);

/// Main application controller
pub struct Controller<P: Provider + 'static> {
    // @field: Shared requester, cloned into search tasks
    requester: Arc<AnalysisRequester<P>>,
    // @field: Show a spinner while a one-shot request runs
    show_progress: bool,
}

impl Controller<Gemini> {
    // @method: Create a controller talking to Gemini with the given configuration
    pub fn with_config(config: &Config) -> Result<Self> {
        if config.provider.api_key.is_empty() {
            warn!("No API key configured; requests will likely be rejected");
        }
        let provider = Gemini::new(
            config.provider.api_key.clone(),
            config.provider.endpoint.clone(),
            config.provider.model.clone(),
            config.provider.timeout_secs,
        );
        Ok(Self::new(AnalysisRequester::new(provider, &config.analysis)))
    }
}

impl<P: Provider + 'static> Controller<P> {
    pub fn new(requester: AnalysisRequester<P>) -> Self {
        Self {
            requester: Arc::new(requester),
            show_progress: true,
        }
    }

    /// Enable or disable the progress spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn requester(&self) -> &AnalysisRequester<P> {
        &self.requester
    }

    /// Check that the provider is reachable and accepts our credentials
    pub async fn check_connection(&self) -> Result<()> {
        self.requester.provider().test_connection().await
            .context("Connection test failed")?;
        info!("Connection to provider OK");
        Ok(())
    }

    /// Analyze a single title, showing a spinner while the request is in flight
    pub async fn analyze(&self, title: &str) -> Result<MovieAnalysis, AnalysisError> {
        let spinner = self.show_progress.then(|| {
            let spinner = ProgressBar::new_spinner();
            let style = ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            spinner.set_style(style);
            spinner.set_message(format!("Analyzing \"{}\"", title.trim()));
            spinner.enable_steady_tick(Duration::from_millis(120));
            spinner
        });

        let start_time = std::time::Instant::now();
        let result = self.requester.analyze(title).await;

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        debug!("Analysis finished in {:.2}s", start_time.elapsed().as_secs_f64());
        result
    }

    /// Run the interactive search loop.
    ///
    /// Each input line is a title (or a `:` command). Every search runs as its
    /// own task; only the response for the latest search is shown. The loop
    /// ends on a quit command, or at end of input once the latest search has
    /// settled.
    pub async fn run_interactive<R, W>(&self, reader: R, out: &mut W, format: OutputFormat) -> Result<SearchSession>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
        let mut lines = reader.lines();
        let mut session = SearchSession::new();
        let mut input_open = true;

        writeln!(out, "Enter a movie title for its critical consensus (:q to quit)")?;

        loop {
            if !input_open && !session.state().is_loading() {
                break;
            }

            tokio::select! {
                line = lines.next_line(), if input_open => {
                    let Some(line) = line.context("Failed to read input")? else {
                        input_open = false;
                        continue;
                    };
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    if QUIT_COMMANDS.contains(&input) {
                        break;
                    }
                    if RESET_COMMANDS.contains(&input) {
                        session.reset();
                        continue;
                    }
                    if let Some(seq) = session.submit(input) {
                        info!("Searching for \"{}\"", input);
                        self.spawn_search(input.to_string(), seq, tx.clone());
                    }
                }
                Some((seq, result)) = rx.recv() => {
                    if session.receive(seq, result) {
                        if let Some(rendered) = render_state(session.state(), format) {
                            writeln!(out, "{}", rendered)?;
                        }
                    }
                }
            }
        }

        Ok(session)
    }

    fn spawn_search(&self, title: String, seq: u64, tx: mpsc::UnboundedSender<Completion>) {
        let requester = Arc::clone(&self.requester);
        tokio::spawn(async move {
            let result = requester.analyze(&title).await;
            // The receiver is gone once the loop has exited
            let _ = tx.send((seq, result));
        });
    }
}
