//! rebirth_cli - Solve rebirth builds from the command line
//!
//! Output is raw JSON (or TOML for edited builds) for other tools to consume.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rebirth_core::EditableStat;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "rebirth", version, about = "Rebirth progression calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve all five stages and print the results
    Solve {
        #[command(flatten)]
        source: BuildSource,
        /// Print indented JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print the point budget of one stage
    Budget {
        #[command(flatten)]
        source: BuildSource,
        /// Stage number, 1-5
        #[arg(long)]
        stage: usize,
    },
    /// Apply one edit within the stage's budget and print the new build as TOML
    Edit {
        #[command(flatten)]
        source: BuildSource,
        /// Stage number, 1-5
        #[arg(long)]
        stage: usize,
        /// Stat to change
        #[arg(long, value_enum, requires = "value")]
        stat: Option<StatArg>,
        /// New value for the stat
        #[arg(long, allow_negative_numbers = true)]
        value: Option<i64>,
        /// New level for the stage
        #[arg(long, allow_negative_numbers = true)]
        level: Option<i64>,
    },
    /// List the built-in presets
    Presets {
        /// Print indented JSON
        #[arg(long)]
        pretty: bool,
    },
}

/// Where the build and constants come from
#[derive(Debug, Clone, Args)]
struct BuildSource {
    /// Built-in preset id (defaults to "blank")
    #[arg(long, conflicts_with = "build")]
    preset: Option<String>,
    /// TOML build file
    #[arg(long)]
    build: Option<PathBuf>,
    /// TOML constants file overriding the defaults
    #[arg(long)]
    constants: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatArg {
    Con,
    Wis,
    Dex,
}

impl From<StatArg> for EditableStat {
    fn from(stat: StatArg) -> Self {
        match stat {
            StatArg::Con => EditableStat::Con,
            StatArg::Wis => EditableStat::Wis,
            StatArg::Dex => EditableStat::Dex,
        }
    }
}

fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();
    let output = match cli.command {
        Command::Solve { source, pretty } => commands::solve(&source, pretty)?,
        Command::Budget { source, stage } => commands::budget(&source, stage)?,
        Command::Edit {
            source,
            stage,
            stat,
            value,
            level,
        } => {
            let edit = commands::StageEdit {
                stat: stat.map(EditableStat::from),
                value,
                level,
            };
            commands::edit(&source, stage, &edit)?
        }
        Command::Presets { pretty } => commands::presets(pretty)?,
    };

    println!("{}", output);
    Ok(())
}

/// Log to stderr so stdout stays machine-readable
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
