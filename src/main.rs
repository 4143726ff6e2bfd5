use clap::{Parser, Subcommand};
use std::path::Path;
use tracing::{info, warn};

use transit_scraper::config::Config;
use transit_scraper::fetch::ReportClient;
use transit_scraper::{filter, logging, normalize, output, table};

#[derive(Parser)]
#[command(name = "transit_scraper")]
#[command(about = "TESS transit finder: scrape, normalize and filter nightly transit candidates")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the raw report page and save it unprocessed
    Fetch {
        /// Override the observation night from the config (MM-DD-YYYY or "today")
        #[arg(long)]
        date: Option<String>,
        /// File to write the raw HTML to
        #[arg(long, default_value = "report.html")]
        out: String,
    },
    /// Run the full pipeline: fetch, normalize, filter, write CSV
    Run {
        /// Override the observation night from the config (MM-DD-YYYY or "today")
        #[arg(long)]
        date: Option<String>,
        /// Output file; defaults to TESS_Targets-<date>.csv in the output directory
        #[arg(long)]
        out: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Fetch { date, out } => {
            if let Some(date) = date {
                config.query.date = date;
            }

            let client = ReportClient::new(config.query);
            let html = client.fetch_report().await?;
            std::fs::write(&out, &html)?;
            println!("📄 Raw report saved to {out}");
        }
        Commands::Run { date, out } => {
            if let Some(date) = date {
                config.query.date = date;
            }
            let out_path = out.unwrap_or_else(|| config.output.target_path(&config.query.date));

            println!("🔭 Fetching transit report for {}...", config.query.date);
            let client = ReportClient::new(config.query.clone());
            let html = client.fetch_report().await?;

            let rows = table::extract_rows(&html)?;
            info!("extracted {} rows from the report table", rows.len());

            let batch = normalize::normalize(&rows)?;
            if !batch.skipped.is_empty() {
                warn!("{} malformed rows skipped", batch.skipped.len());
            }

            let curated = filter::apply(&batch.records, &config.filters);
            output::write_csv(&curated, Path::new(&out_path))?;

            println!("\n📊 Pipeline results:");
            println!("   Table rows: {}", rows.len());
            println!("   Normalized: {}", batch.records.len());
            println!("   Skipped as malformed: {}", batch.skipped.len());
            println!("   After filters: {}", curated.len());
            println!("   Output file: {out_path}");

            if !batch.skipped.is_empty() {
                println!("\n⚠️  Rows skipped as malformed:");
                for diagnostic in &batch.skipped {
                    println!("   - {diagnostic}");
                }
            }
        }
    }

    Ok(())
}
