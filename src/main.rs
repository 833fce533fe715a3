use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "bili-temp")]
#[command(about = "Upload images to Bilibili and print their public URLs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to config.json (defaults to the user config directory)
    #[arg(long, short, global = true, env = "BILI_TEMP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload one or more images, one request each
    Upload {
        /// Local paths, file:// URLs or http(s) URLs
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Upload method: dynamic or article
        #[arg(long, short)]
        method: Option<String>,

        /// Print results as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the effective configuration with secrets redacted
    Show,
    /// Write a new config file
    Init {
        /// bili_jct cookie value
        #[arg(long)]
        csrf: String,

        /// SESSDATA cookie value
        #[arg(long)]
        sessdata: String,

        /// Upload method: dynamic or article
        #[arg(long)]
        method: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    log::debug!("Starting bili-temp");

    match cli.command {
        Commands::Upload {
            inputs,
            method,
            json,
        } => commands::upload(cli.config.as_deref(), inputs, method, json).await,
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::config_path(cli.config.as_deref()),
            ConfigAction::Show => commands::config_show(cli.config.as_deref()),
            ConfigAction::Init {
                csrf,
                sessdata,
                method,
            } => commands::config_init(cli.config.as_deref(), &csrf, &sessdata, method),
        },
    }
}
