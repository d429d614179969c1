use anyhow::Result;
use clap::{Parser, Subcommand};

use envelope_engine::cli::{
    handle_contribution_command, handle_overview_command, handle_progress_command,
    handle_ready_command, ContributionArgs, OverviewArgs, ProgressArgs, ReadyArgs,
};
use envelope_engine::config::{paths::EnvelopePaths, settings::Settings};
use envelope_engine::logging;

#[derive(Parser)]
#[command(
    name = "envelope-engine",
    author = "Kaylee Beyene",
    version,
    about = "Zero-based budget allocation and progress engine",
    long_about = "Computes ready-to-assign, category progress and goal contributions \
                  for a zero-based budget snapshot."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month overview for a snapshot
    Overview(OverviewArgs),

    /// Show money ready to assign for a snapshot
    Ready(ReadyArgs),

    /// Compute progress for a single category
    Progress(ProgressArgs),

    /// Compute this month's goal contribution
    Contribution(ContributionArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = EnvelopePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    if cli.verbose {
        logging::init("envelope_engine=debug");
    } else {
        logging::init(&settings.log_level);
    }

    match cli.command {
        Some(Commands::Overview(args)) => handle_overview_command(&settings, args)?,
        Some(Commands::Ready(args)) => handle_ready_command(args)?,
        Some(Commands::Progress(args)) => handle_progress_command(&settings, args)?,
        Some(Commands::Contribution(args)) => handle_contribution_command(&settings, args)?,
        Some(Commands::Config) => {
            println!("Envelope Engine Configuration");
            println!("=============================");
            println!("Base directory:     {}", paths.base_dir().display());
            println!("Settings file:      {}", paths.settings_file().display());
            println!("Snapshot directory: {}", paths.snapshot_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency:    {}", settings.currency);
            println!("  Date format: {}", settings.date_format);
            println!("  Log level:   {}", settings.log_level);
            println!("  Bar width:   {}", settings.bar_width);
        }
        None => {
            println!("Envelope Engine - zero-based budget calculations");
            println!();
            println!("Run 'envelope-engine --help' for usage information.");
        }
    }

    Ok(())
}
