use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use snspec::catalog;
use snspec::config::Config;
use snspec::fetch::CatalogClient;
use snspec::logging;
use snspec::pipeline;

#[derive(Parser)]
#[command(name = "snspec")]
#[command(about = "Supernova spectra and metadata scraper")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch catalog records, write spectrum tables, and collect metadata
    Run {
        /// CSV file with a Name column listing the transients to fetch
        input: PathBuf,
        /// Maximum number of names to process
        #[arg(long)]
        limit: Option<usize>,
        /// Directory for per-spectrum tables
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Skip writing spectrum tables to disk
        #[arg(long)]
        no_spectra: bool,
        /// Path for the aggregate metadata file
        #[arg(long)]
        meta_path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            limit,
            data_dir,
            no_spectra,
            meta_path,
        } => {
            println!("🔭 Running catalog scrape...");

            let config = Config::load_or_default()?;
            let limit = limit.unwrap_or(config.catalog.fetch_limit);
            let data_dir = if no_spectra {
                None
            } else {
                Some(data_dir.unwrap_or_else(|| PathBuf::from(&config.output.data_dir)))
            };
            let meta_path =
                meta_path.unwrap_or_else(|| PathBuf::from(&config.output.meta_path));

            let names = catalog::read_name_list(&input)?;
            info!("Read {} names from {}", names.len(), input.display());

            let client =
                CatalogClient::new(&config.catalog.base_url, config.catalog.timeout_seconds)?;

            match pipeline::run_batch(&client, &names, limit, data_dir.as_deref(), &meta_path)
                .await
            {
                Ok(result) => {
                    println!("\n📊 Batch results:");
                    println!("   Requested: {}", result.requested);
                    println!("   Extracted: {}", result.extracted);
                    println!("   Errors: {}", result.errors.len());
                    println!("   Metadata file: {}", result.meta_path);

                    if !result.errors.is_empty() {
                        println!("\n⚠️  Errors encountered:");
                        for err in &result.errors {
                            println!("   - {}", err);
                        }
                    }
                }
                Err(e) => {
                    error!("Batch run failed: {}", e);
                    println!("❌ Batch run failed: {}", e);
                }
            }
        }
    }
    Ok(())
}
