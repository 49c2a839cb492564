//! cinedb CLI
//!
//! Command-line interface for querying and maintaining the movie catalog.

mod cli_types;
mod commands;
mod error;
mod progress;
mod settings;

use std::io::Write;

use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;
use settings::{Overrides, Settings};

/// Emit an empty info line (section spacing in normal output).
pub(crate) fn log_blank() {
    log::info!("");
}

fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).target(env_logger::Target::Stdout);
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            _ => writeln!(buf, "{}", record.args()),
        });
    }
    // RUST_LOG wins over the flags when set
    builder.parse_env("RUST_LOG");
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Commands::Config {
        action: ConfigAction::Path,
    } = cli.command
    {
        commands::config::run_config_path();
        return Ok(());
    }

    let mut overrides = Overrides {
        db: cli.db,
        ..Default::default()
    };
    match &cli.command {
        Commands::Init { data } => overrides.data = data.clone(),
        Commands::Add { delimiter, .. } => overrides.delimiter = *delimiter,
        _ => {}
    }
    let settings = Settings::load(&overrides)?;
    log::debug!("Using database {}", settings.db_path.value.display());

    match cli.command {
        Commands::Init { .. } => commands::init::run_init(&settings, cli.quiet, cli.verbose),
        Commands::Search { question, json } => {
            commands::search::run_search(&settings, &question, json)
        }
        Commands::Add { line, .. } => commands::add::run_add(&settings, &line),
        Commands::Schema { json } => commands::schema::run_schema(&settings, json),
        Commands::Stats => commands::stats::run_stats(&settings),
        Commands::Clear { confirm } => commands::clear::run_clear(&settings, confirm),
        Commands::Patterns => {
            commands::patterns::run_patterns();
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(&settings);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    }
}
