use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use once_cell::sync::OnceCell;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing_subscriber::{fmt, EnvFilter};

use crate::calendar::{Clock, FixedClock, SystemClock};
use crate::config::ConfigLoader;

pub mod commands;

use self::commands::{AddArgs, BoundsArgs, ResolveArgs, TagsArgs};

#[derive(Parser, Debug)]
#[command(
    name = "countdowns",
    version,
    about = "Plan countdown events from the command line"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the config file location (takes precedence over COUNTDOWNS_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Treat this RFC 3339 instant as the current time
    #[arg(long, value_parser = parse_now)]
    pub now: Option<OffsetDateTime>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split free-text tag entry into tags
    Tags(TagsArgs),
    /// Resolve the date-time an event would be saved with
    Resolve(ResolveArgs),
    /// Show the date and time picker limits for a selected date
    Bounds(BoundsArgs),
    /// Create an event and print it with its list row
    Add(AddArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        env::set_var("COUNTDOWNS_CONFIG", path);
    }

    init_tracing(&cli.log_level)
        .with_context(|| format!("initialising logging at level {}", cli.log_level))?;
    let loader = ConfigLoader::discover()?;
    let config = loader.load_or_init()?;

    let clock: Arc<dyn Clock> = match cli.now {
        Some(now) => Arc::new(FixedClock(now)),
        None => Arc::new(SystemClock),
    };

    let output = match cli.command {
        Commands::Tags(args) => commands::split_tags(&config, &args),
        Commands::Resolve(args) => commands::resolve(&config, clock, &args)?,
        Commands::Bounds(args) => commands::bounds(&config, clock, &args),
        Commands::Add(args) => commands::run_add(&config, clock, args)?,
    };
    print!("{output}");
    Ok(())
}

fn parse_now(raw: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(raw, &Rfc3339).map_err(|err| format!("expected RFC 3339 instant: {err}"))
}

fn init_tracing(level: &str) -> Result<()> {
    static INIT: OnceCell<()> = OnceCell::new();
    INIT.get_or_try_init(|| {
        let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
        Ok(())
    })
    .map(|_| ())
}
