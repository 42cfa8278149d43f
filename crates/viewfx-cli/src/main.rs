use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use viewfx_core::AppConfig;

mod commands;
mod page;

#[derive(Parser)]
#[command(name = "viewfx")]
#[command(author, version, about = "Scroll-triggered counters and fade-ins")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the config file (defaults to ~/.config/viewfx/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a page's scroll script and print the animations it triggers
    Simulate {
        /// Page layout file (TOML); a built-in demo page is used if omitted
        page: Option<PathBuf>,
    },
    /// Manage the cookie consent flag
    Consent {
        #[command(subcommand)]
        action: ConsentAction,
    },
    /// Validate an email address the way the newsletter form does
    CheckEmail {
        email: String,
    },
    /// Filter items by a case-insensitive search term
    Search {
        term: String,
        /// Items to filter; read one per line from stdin if omitted
        items: Vec<String>,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConsentAction {
    /// Show whether consent has been given
    Status,
    /// Record consent
    Accept,
    /// Forget the recorded decision
    Reset,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default config file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Handle commands
    match cli.command {
        Some(Commands::Simulate { page }) => {
            commands::simulate::run(&config, page.as_deref()).await
        }
        None => commands::simulate::run(&config, None).await,
        Some(Commands::Consent { action }) => match action {
            ConsentAction::Status => commands::consent::status(&config),
            ConsentAction::Accept => commands::consent::accept(&config),
            ConsentAction::Reset => commands::consent::reset(&config),
        },
        Some(Commands::CheckEmail { email }) => commands::check_email::run(&email),
        Some(Commands::Search { term, items }) => commands::search::run(&term, items),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init => commands::config::init(&config_path),
        },
    }
}
