use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use household::cli::{
    handle_chore_command, handle_expense_command, handle_export_command, handle_log_command,
    handle_member_command, handle_occurrences_command, handle_template_command, LogArgs,
    OccurrencesArgs,
};
use household::config::{paths::HouseholdPaths, settings::Settings};
use household::storage::Storage;

#[derive(Parser)]
#[command(
    name = "household",
    version,
    about = "Chore rotation and shared expenses for a household",
    long_about = "household keeps a small household's chores rotating fairly week to week \
                  and splits shared expenses evenly between members, including rent and \
                  other bills that repeat every week or month."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new household
    Init,

    /// Show current configuration and paths
    Config,

    /// Member management commands
    #[command(subcommand)]
    Member(household::cli::MemberCommands),

    /// Chore management and weekly rotation
    #[command(subcommand)]
    Chore(household::cli::ChoreCommands),

    /// Shared expense commands
    #[command(subcommand)]
    Expense(household::cli::ExpenseCommands),

    /// Recurring expense rules
    #[command(subcommand, alias = "rule")]
    Template(household::cli::TemplateCommands),

    /// Generate today's recurring expenses
    Occurrences(OccurrencesArgs),

    /// Export household data
    #[command(subcommand)]
    Export(household::cli::ExportCommands),

    /// Show recent changes from the audit log
    Log(LogArgs),
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = HouseholdPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings);

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing household at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  household member add <name>     add everyone who lives here");
            println!("  household chore add <label>     list the chores to rotate");
            println!("  household chore assign          hand out this week's chores");
        }
        Some(Commands::Config) => {
            println!("household Configuration");
            println!("=======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Default category: {}", settings.default_category);
            println!("  Categories:       {}", settings.categories.join(", "));
            println!("  Cache TTL:        {}s", settings.cache_ttl_secs);
            println!("  Log level:        {}", settings.log_level);
        }
        Some(Commands::Member(cmd)) => {
            handle_member_command(&storage, cmd)?;
        }
        Some(Commands::Chore(cmd)) => {
            handle_chore_command(&storage, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Template(cmd)) => {
            handle_template_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Occurrences(args)) => {
            handle_occurrences_command(&storage, &settings, args)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Log(args)) => {
            handle_log_command(&storage, args)?;
        }
        None => {
            println!("household - chores and shared expenses");
            println!();
            println!("Run 'household --help' for usage information.");
        }
    }

    Ok(())
}
