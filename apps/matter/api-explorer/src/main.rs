//! Matter API Explorer
//!
//! Authenticates against the Matter API, probes a catalog of endpoints with
//! several methods and query variants, and records which ones answer along
//! with an inferred schema of each response.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_explorer::ReqwestTransport;
use eyre::Result;
use tracing::info;

mod config;
mod explorer;
mod qr;

use config::Config;
use explorer::ApiExplorer;

#[derive(Parser)]
#[command(name = "api-explorer")]
#[command(about = "Explore the Matter API and document the endpoints that respond")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in by confirming a QR session in the Matter app
    Auth,

    /// Probe every catalogued endpoint and write the results
    Explore {
        /// Endpoint catalog to use instead of the one in the data directory
        #[arg(short, long)]
        endpoints: Option<PathBuf>,
    },

    /// Export the full highlights feed
    Highlights,

    /// Rebuild the summary of successful endpoints from saved results
    Summarize,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let config = Config::from_env()?;
    let cli = Cli::parse();

    let explorer = ApiExplorer::new(config, ReqwestTransport::new());

    match cli.command {
        Commands::Auth => {
            let settings = explorer.authenticate().await?;
            let preview: String = settings
                .access_token
                .as_deref()
                .unwrap_or_default()
                .chars()
                .take(10)
                .collect();
            println!("Authentication successful! Access token: {}...", preview);
        }

        Commands::Explore { endpoints } => {
            let report = explorer.explore(endpoints.as_deref()).await?;

            info!(
                endpoints = report.endpoints,
                requests = report.requests_sent,
                cache_hits = report.cache_hits,
                duration_ms = report.duration_ms,
                "Exploration complete"
            );

            if report.successful.is_empty() {
                println!("No working endpoints found. Check your authentication token.");
            } else {
                println!("Found {} working endpoints.", report.successful.len());
                println!("{}", serde_json::to_string_pretty(&report.successful)?);
            }
        }

        Commands::Highlights => {
            let count = explorer.export_highlights().await?;
            println!("Saved {} highlights", count);
        }

        Commands::Summarize => {
            let summary = explorer.summarize_saved().await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
