//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;

use crate::config;

mod commands;

#[derive(Parser)]
#[command(name = "chatrelay")]
#[command(version = "0.1")]
#[command(about = "Proxy-backed chat client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the system prompt from config
    #[arg(long)]
    system_prompt: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Interactive chat on stdin/stdout
    Chat,

    /// Sends a single prompt and prints the rendered reply
    Ask {
        /// The prompt to send
        #[arg(value_name = "PROMPT")]
        prompt: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = config::Config::load().context("load config")?;

    if let Some(sp) = cli.system_prompt.as_deref() {
        let trimmed = sp.trim();
        if trimmed.is_empty() {
            config.system_prompt = None;
            config.system_prompt_file = None;
        } else {
            config.system_prompt = Some(trimmed.to_string());
            config.system_prompt_file = None;
        }
    }

    // default to chat mode
    let Some(command) = cli.command else {
        return commands::chat::run(&config).await;
    };

    match command {
        Commands::Chat => commands::chat::run(&config).await,

        Commands::Ask { prompt } => commands::ask::run(&prompt, &config).await,

        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
