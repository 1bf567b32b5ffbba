// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use xcstrings_tools::app_config::{self, Config};
use xcstrings_tools::app_controller::Controller;
use xcstrings_tools::errors::AppError;
use xcstrings_tools::operations::{MergeEvent, StatusReport};

const DEFAULT_CONFIG_PATH: &str = "xcstrings-tools.json";

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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

/// Output format of the status report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add the configured translations to a catalog, never overwriting finished ones
    MergeTranslations(MergeArgs),

    /// Report stale strings, unreviewed and missing translations
    StatusReport(StatusArgs),

    /// Delete every stale string from a catalog
    PruneStale(PruneArgs),

    /// Generate shell completions for xcstrings-tools
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct MergeArgs {
    /// Catalog file, or a directory searched for .xcstrings files
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Show what would change without writing the file
    #[arg(short = 'n', long)]
    dry_run: bool,
}

#[derive(Parser, Debug)]
struct StatusArgs {
    /// Catalog file or directory (defaults to the configured catalog path)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Comma-separated language codes to check (e.g. 'de,es,fr,pt-BR')
    #[arg(long, value_name = "LANGUAGES")]
    languages: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

#[derive(Parser, Debug)]
struct PruneArgs {
    /// Catalog file, or a directory searched for .xcstrings files
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// List stale strings without removing them
    #[arg(short = 'n', long)]
    dry_run: bool,
}

/// xcstrings-tools - maintenance utilities for Xcode string catalogs
#[derive(Parser, Debug)]
#[command(name = "xcstrings-tools")]
#[command(version)]
#[command(about = "Maintenance utilities for Xcode string catalogs")]
#[command(long_about = "xcstrings-tools merges known translations into .xcstrings catalogs, reports their
localization status and removes stale strings.

EXAMPLES:
    xcstrings-tools merge-translations App/Localizable.xcstrings
    xcstrings-tools status-report App/Localizable.xcstrings --languages de,fr
    xcstrings-tools status-report --format json
    xcstrings-tools prune-stale --dry-run App/
    xcstrings-tools completions bash > xcstrings-tools.bash

CONFIGURATION:
    Settings are read from xcstrings-tools.json when present (override with
    --config-path): default catalog path, target languages, the translation
    table used by merge-translations and the log level.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn decoration_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "\x1B[1;31m"),
            Level::Warn => ("🚧", "\x1B[1;33m"),
            Level::Info => ("", "\x1B[1;32m"),
            Level::Debug => ("🔍", "\x1B[1;36m"),
            Level::Trace => ("📋", "\x1B[1;35m"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::decoration_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() {
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    // Usage errors exit with 1; --help and --version exit with 0
    let cli = match CommandLineOptions::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run(cli) {
        error!("Error: {:#}", e);
        if e.downcast_ref::<AppError>().is_some_and(AppError::is_not_found) {
            eprintln!("Usage: xcstrings-tools <merge-translations|status-report|prune-stale> [PATH] (see --help)");
        }
        std::process::exit(1);
    }
}

fn run(cli: CommandLineOptions) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "xcstrings-tools", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_default(&cli.config_path)?;
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.into());

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::MergeTranslations(args) => run_merge(&controller, args),
        Commands::StatusReport(args) => run_status(&controller, args),
        Commands::PruneStale(args) => run_prune(&controller, args),
        Commands::Completions { .. } => Ok(()),
    }
}

fn run_merge(controller: &Controller, args: MergeArgs) -> Result<()> {
    let catalogs = controller.resolve_catalogs(&args.path)?;
    for (path, outcome) in controller.merge_files(&catalogs, args.dry_run)? {
        println!("Adding translations to: {}\n", path.display());

        for event in &outcome.events {
            match event {
                MergeEvent::MissingKey { .. } => println!("  Warning: {}", event),
                _ => println!("  {}", event),
            }
        }

        println!("\nDone! Added {} translations.", outcome.changed());
        if args.dry_run {
            println!("Dry run: no changes written.");
        }
    }

    Ok(())
}

fn run_status(controller: &Controller, args: StatusArgs) -> Result<()> {
    let target_languages = controller.target_languages(args.languages.as_deref())?;
    let path = args
        .path
        .unwrap_or_else(|| controller.default_catalog_path().to_path_buf());

    let mut reports: BTreeMap<String, StatusReport> = BTreeMap::new();
    for catalog_path in controller.resolve_catalogs(&path)? {
        let report = controller.status_file(&catalog_path, &target_languages)?;
        match args.format {
            ReportFormat::Text => {
                println!("Analyzing: {}\n", catalog_path.display());
                print!("{}", report);
            }
            ReportFormat::Json => {
                reports.insert(catalog_path.display().to_string(), report);
            }
        }
    }

    if args.format == ReportFormat::Json {
        // A single catalog prints its report directly, several are keyed by path
        let json = match reports.values().next() {
            Some(report) if reports.len() == 1 => serde_json::to_string_pretty(report)?,
            _ => serde_json::to_string_pretty(&reports)?,
        };
        println!("{}", json);
    }

    Ok(())
}

fn run_prune(controller: &Controller, args: PruneArgs) -> Result<()> {
    let catalogs = controller.resolve_catalogs(&args.path)?;
    for (path, removed) in controller.prune_files(&catalogs, args.dry_run)? {
        println!("Removing stale strings from: {}\n", path.display());

        for key in &removed {
            println!("  Removed: '{}'", key);
        }

        println!("\nDone! Removed {} stale strings.", removed.len());
        if args.dry_run {
            println!("Dry run: no changes written.");
        }
    }

    Ok(())
}
