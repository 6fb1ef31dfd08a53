pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "shopwise",
    about = "Shopwise operator CLI",
    long_about = "Inspect configuration, check readiness, apply migrations, browse the seed catalog, and replay shopper sessions through the recommendation engine.",
    after_help = "Examples:\n  shopwise doctor --json\n  shopwise catalog --category sports\n  shopwise simulate --events session.json --query yoga"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config and database connectivity")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "List seed catalog products as JSON")]
    Catalog {
        #[arg(long, help = "Only list products in this category (e.g. electronics)")]
        category: Option<String>,
    },
    #[command(about = "Replay behavioral events from a JSON file and print the resulting recommendations")]
    Simulate {
        #[arg(long, help = "Path to a JSON array of behavioral events")]
        events: PathBuf,
        #[arg(long, help = "Optional chat query used to narrow recommendations")]
        query: Option<String>,
        #[arg(long, help = "Number of recommendations to return")]
        limit: Option<usize>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => commands::config::run(),
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Migrate => commands::migrate::run(),
        Command::Catalog { category } => commands::catalog::run(category.as_deref()),
        Command::Simulate { events, query, limit } => {
            commands::simulate::run(&events, query.as_deref(), limit)
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
