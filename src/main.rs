// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use cinescore::app_config::{self, Config};
use cinescore::app_controller::Controller;
use cinescore::errors::AnalysisError;
use cinescore::render::{render_analysis, OutputFormat};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get the critical consensus for one movie (default command)
    Analyze {
        /// Movie title to analyze
        #[arg(value_name = "TITLE", required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Search titles one per line from standard input
    Interactive,

    /// Check that the model endpoint accepts the configured API key
    Check,

    /// Generate shell completions for cinescore
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct GlobalOptions {
    /// Model name to use for analysis
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Model API endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Sampling temperature
    #[arg(long, global = true)]
    temperature: Option<f32>,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

/// CineScore - AI critical consensus for movies
///
/// Asks a web-grounded generative model what critics think of a movie and
/// turns the answer into a summary, pros, cons, a sentiment and cited sources.
#[derive(Parser, Debug)]
#[command(name = "cinescore")]
#[command(version)]
#[command(about = "AI-powered movie critical consensus")]
#[command(long_about = "CineScore asks a web-grounded Gemini model for the critical consensus on a movie.

EXAMPLES:
    cinescore \"Dune: Part Two\"                 # Analyze one title
    cinescore analyze Oppenheimer --json       # Print the analysis as JSON
    cinescore interactive                      # Search titles from stdin
    cinescore check                            # Verify the API key
    cinescore completions bash > cinescore.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically. The API key is read from
    the API_KEY or GEMINI_API_KEY environment variable (or a .env file).")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Movie title to analyze
    #[arg(value_name = "TITLE")]
    title: Vec<String>,

    #[command(flatten)]
    options: GlobalOptions,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()), now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();
    let options = cli.options;

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "cinescore", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Analyze { title }) => run_analyze(&title.join(" "), &options).await,
        Some(Commands::Interactive) => run_interactive(&options).await,
        Some(Commands::Check) => {
            let config = load_config(&options)?;
            Controller::with_config(&config)?.check_connection().await
        }
        None => {
            if cli.title.is_empty() {
                return Err(anyhow!("TITLE is required when no subcommand is specified"));
            }
            run_analyze(&cli.title.join(" "), &options).await
        }
    }
}

fn load_config(options: &GlobalOptions) -> Result<Config> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let mut config = Config::load_or_create(&options.config_path)?;
    config.apply_env();

    if let Some(model) = &options.model {
        config.provider.model = model.clone();
    }
    if let Some(endpoint) = &options.endpoint {
        config.provider.endpoint = endpoint.clone();
    }
    if let Some(temperature) = options.temperature {
        config.analysis.temperature = temperature;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    debug!("Using model {} at {}", config.provider.model, config.provider.endpoint);
    Ok(config)
}

fn output_format(options: &GlobalOptions) -> OutputFormat {
    if options.json { OutputFormat::Json } else { OutputFormat::Text }
}

async fn run_analyze(title: &str, options: &GlobalOptions) -> Result<()> {
    let config = load_config(options)?;
    let controller = Controller::with_config(&config)?;

    match controller.analyze(title).await {
        Ok(analysis) => {
            let rendered = match output_format(options) {
                OutputFormat::Json => serde_json::to_string_pretty(&analysis)
                    .context("Failed to serialize analysis")?,
                OutputFormat::Text => render_analysis(title.trim(), &analysis),
            };
            println!("{}", rendered);
            Ok(())
        }
        Err(e) => {
            if let AnalysisError::FetchFailed(cause) = &e {
                debug!("Cause: {}", cause);
            }
            error!("{}", e.user_message());
            Err(e.into())
        }
    }
}

async fn run_interactive(options: &GlobalOptions) -> Result<()> {
    let config = load_config(options)?;
    let controller = Controller::with_config(&config)?.with_progress(false);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    controller.run_interactive(stdin, &mut stdout, output_format(options)).await?;
    Ok(())
}
