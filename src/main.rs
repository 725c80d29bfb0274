use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use archive_collections::config::CONFIG;
use archive_collections::lookup::{collection_id_by_name, load_collections};
use archive_collections::searcher::{CollectionSearcher, SearchOutcome, SearchRequest};
use archive_collections::transport::ClientConfig;

#[derive(Parser)]
#[command(name = "archive-collections", about = "Find Archive-It collections by keyword")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for collections and optionally save them as JSON
    Search {
        #[arg(required = true)]
        query: Vec<String>,
        #[arg(long)]
        output_dir: Option<PathBuf>,
        #[arg(long)]
        no_save: bool,
        #[arg(short, long)]
        quiet: bool,
        /// Print the full outcome as JSON
        #[arg(long)]
        json: bool,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Resolve a collection id from a saved collections file
    Lookup { file: PathBuf, name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let quiet = matches!(cli.command, Command::Search { quiet: true, .. });
    tracing_subscriber::fmt()
        .with_max_level(if quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .init();

    match cli.command {
        Command::Search {
            query,
            output_dir,
            no_save,
            quiet,
            json,
            timeout,
            base_url,
        } => {
            let mut config = ClientConfig::from_env();
            if let Some(base_url) = base_url {
                config.base_url = base_url;
            }
            if let Some(secs) = timeout {
                config = config.with_timeout(Duration::from_secs(secs));
            }
            let searcher = CollectionSearcher::from_config(&config)
                .context("Failed to set up the search client")?;

            let request = SearchRequest::new(query.join(" "))
                .save_to_file(!no_save)
                .output_dir(output_dir.unwrap_or_else(|| PathBuf::from(&CONFIG.output_dir)))
                .verbose(!quiet);
            let outcome = searcher.search(&request).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
            match &outcome {
                SearchOutcome::Found(report) => {
                    if !json {
                        println!("Search complete: Found {} collections", report.count);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                SearchOutcome::Failed(failure) => {
                    if !json {
                        println!("Search failed with error: {}", failure.error);
                    }
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Lookup { file, name } => {
            let data = load_collections(&file)?;
            match collection_id_by_name(&data, &name) {
                Some(id) => {
                    println!("Collection ID: {id}");
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    println!("No collection named '{name}' in {}", file.display());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
