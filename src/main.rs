use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use envelope_ledger::cli::{parse_total_budget, serve_json_lines, Session};
use envelope_ledger::config::{LedgerPaths, Settings};
use envelope_ledger::services::EnvelopeLedger;

#[derive(Parser)]
#[command(
    name = "envelope-ledger",
    version,
    about = "In-memory envelope budgeting ledger",
    long_about = "Divide a fixed total budget into named envelopes, then create, \
                  update, delete and transfer between them. Envelopes live for \
                  the length of one session."
)]
struct Cli {
    /// Total budget for this session (overrides the config file)
    #[arg(long, global = true, env = "ENVELOPE_LEDGER_TOTAL_BUDGET")]
    total_budget: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session reading commands from stdin
    Shell,

    /// Run a file of session commands, stopping at the first error
    Run {
        /// Path to the command script
        file: PathBuf,
    },

    /// Serve JSON request lines from stdin, writing JSON responses to stdout
    Api,

    /// Write current settings (including --total-budget) to the config file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(total) = &cli.total_budget {
        settings.total_budget = parse_total_budget(total)?;
    }

    match cli.command {
        Some(Commands::Shell) => {
            let session = Session::new(EnvelopeLedger::new(settings.total_budget)?, settings);
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            session.run_interactive(stdin.lock(), io::stdout(), prompt)?;
        }
        Some(Commands::Run { file }) => {
            let session = Session::new(EnvelopeLedger::new(settings.total_budget)?, settings);
            session
                .run_script(&file, io::stdout())
                .with_context(|| format!("Script {} failed", file.display()))?;
        }
        Some(Commands::Api) => {
            let ledger = EnvelopeLedger::new(settings.total_budget)?;
            serve_json_lines(&ledger, io::stdin().lock(), io::stdout())?;
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Saved settings to {}", paths.settings_file().display());
            println!("  Total budget: {}", settings.format_money(settings.total_budget));
        }
        Some(Commands::Config) => {
            println!("Envelope Ledger Configuration");
            println!("=============================");
            println!("Config directory: {}", paths.config_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Total budget:    {}", settings.format_money(settings.total_budget));
            println!("  Currency symbol: {}", settings.currency_symbol);
        }
        None => {
            println!("Envelope Ledger - in-memory envelope budgeting");
            println!();
            println!("Run 'envelope-ledger --help' for usage information.");
            println!("Run 'envelope-ledger shell' to start a session.");
        }
    }

    Ok(())
}
