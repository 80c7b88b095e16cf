// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::PathBuf;

use selectrans::app_config::{self, Config};
use selectrans::get_language_name;
use selectrans::render::Renderer;
use selectrans::selection::{CommandSelectionSource, normalize, normalize_lines};
use selectrans::translation::{
    LookupKind, Monitor, RouteDecision, TranslationRequest, TranslationRouter, Translator,
};

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
    /// Watch the selection and translate every new one (default command)
    Watch,

    /// Translate the given text once and exit
    Translate {
        /// Text to translate; several words are joined with spaces
        #[arg(value_name = "TEXT", required = true)]
        text: Vec<String>,
    },

    /// Check that the configured services can be reached
    Check,

    /// Generate shell completions for selectrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// selectrans - translate whatever you select
///
/// Polls the X selection and prints a dictionary entry for single words or a
/// machine translation for longer text, in the order the selections were made.
#[derive(Parser, Debug)]
#[command(name = "selectrans")]
#[command(version)]
#[command(about = "Selection-driven translation and dictionary lookups")]
#[command(long_about = "selectrans polls the text selection and prints a translation for every new selection.

EXAMPLES:
    selectrans                                  # Watch the selection with the default config
    selectrans -t ja                            # Translate into Japanese
    selectrans translate serendipity            # One-shot dictionary lookup
    selectrans translate Hello World            # One-shot sentence translation
    selectrans check                            # Test the configured services
    selectrans completions bash > selectrans.bash

CONFIGURATION:
    Configuration is read from <config dir>/selectrans/conf.json unless --config
    is given. If the file doesn't exist, a default one is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SELECTRANS_CONFIG")]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Source language code (e.g., 'en', 'de')
    #[arg(short, long, global = true)]
    source_language: Option<String>,

    /// Target language code (e.g., 'zh-CN', 'ja')
    #[arg(short, long, global = true)]
    target_language: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Maximum number of lookups running at once
    #[arg(long, global = true)]
    concurrency: Option<usize>,
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
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
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
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Everything is accepted here; the effective level is applied through
    // set_max_level once the config is known.
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "selectrans", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        None | Some(Commands::Watch) => run_watch(config).await,
        Some(Commands::Translate { text }) => run_translate(config, &text.join(" ")).await,
        Some(Commands::Check) => run_check(config).await,
        Some(Commands::Completions { .. }) => Ok(()),
    }
}

/// Load or create the configuration file and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);

    if !config_path.exists() {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path.display()
        );
    }
    let mut config = Config::load_or_create(&config_path)?;

    if let Some(source_lang) = &cli.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &cli.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(concurrency) = cli.concurrency {
        config.concurrent_requests = concurrency;
    }
    if cli.no_color {
        config.color = false;
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

async fn run_watch(config: Config) -> Result<()> {
    let translator = Translator::from_config(&config).context("Failed to set up providers")?;
    let source = CommandSelectionSource::from_config(&config.selection);
    let renderer = Renderer::stdout(config.color);

    let language_name = |tag: &str| get_language_name(tag).unwrap_or_else(|_| tag.to_string());
    info!(
        "Watching selection every {} ms ({} -> {}), Ctrl-C to stop",
        config.poll_interval_ms,
        language_name(&config.source_language),
        language_name(&config.target_language)
    );

    let monitor = Monitor::new(source, translator, renderer, &config);
    let stats = monitor
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    info!(
        "Stopped after {} polls: {} lookups, {} rendered, {} rejected, {} duplicates, {} source errors",
        stats.polls, stats.dispatched, stats.rendered, stats.rejected, stats.duplicates, stats.source_errors
    );
    Ok(())
}

async fn run_translate(config: Config, text: &str) -> Result<()> {
    let text = if config.selection.line_aware {
        normalize_lines(text.as_bytes())
    } else {
        normalize(text.as_bytes())
    };
    if text.is_empty() {
        return Err(anyhow!("Nothing to translate"));
    }

    let mut renderer = Renderer::stdout(config.color);
    let kind = match TranslationRouter::from_config(&config).route(&text) {
        RouteDecision::Reject(reason) => {
            renderer.notice(&reason.to_string())?;
            return Ok(());
        }
        RouteDecision::ShortLookup => LookupKind::Short,
        RouteDecision::LongTranslate => LookupKind::Long,
    };

    let translator = Translator::from_config(&config).context("Failed to set up providers")?;
    let result = translator.translate(&TranslationRequest::new(text, 0, kind)).await;
    renderer.render(&result)?;
    Ok(())
}

async fn run_check(config: Config) -> Result<()> {
    let translator = Translator::from_config(&config).context("Failed to set up providers")?;
    let mut failures = 0;

    for provider in translator.providers() {
        match provider.test_connection().await {
            Ok(()) => info!("{}: reachable", provider.name()),
            Err(e) => {
                error!("{}: {}", provider.name(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!("{} provider(s) failed the connection test", failures));
    }
    Ok(())
}
