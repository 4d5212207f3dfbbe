use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use woo_crosssell::config::Config;
use woo_crosssell::services::object_store::{DirObjectStore, ObjectStore};
use woo_crosssell::services::store_api::WooClient;
use woo_crosssell::services::{collector, publisher, training};

#[derive(Parser)]
#[command(name = "woo-crosssell")]
#[command(about = "Cross-sell recommendation pipeline for a WooCommerce store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch orders and products and stage the training table artifact
    ExportTraining {
        /// Object key to write the training CSV under
        #[arg(long, default_value = "training/orders.csv")]
        key: String,
    },
    /// Resolve a model-output artifact and upload cross-sell lists
    Publish {
        /// Object key holding the model-output CSV
        #[arg(long, default_value = "output/recommendations.csv")]
        key: String,
        /// Override the configured recommendations-per-product limit
        #[arg(long)]
        top_n: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("configuration")?;

    let api = WooClient::new(
        config.store_url.clone(),
        config.consumer_key.clone(),
        config.consumer_secret.clone(),
    );
    let store = DirObjectStore::new(config.artifact_dir.clone());

    match cli.command {
        Commands::ExportTraining { key } => {
            let orders = collector::fetch_orders(&api, config.page_size).await?;
            let products = collector::fetch_products(&api, config.page_size).await?;

            let table = training::build_training_table(&orders, &products);
            let csv = training::to_csv(&table)?;
            store.put(&key, &csv).await?;

            println!(
                "Training table staged at {key}: {} rows ({} dropped at join).",
                table.rows.len(),
                table.dropped
            );
        }
        Commands::Publish { key, top_n } => {
            let top_n = top_n.unwrap_or(config.top_n);

            let bytes = store.get(&key).await?;
            let rows = publisher::read_recommendations(&bytes)?;
            let products = collector::fetch_products(&api, config.page_size).await?;

            let (groups, gaps) = publisher::resolve_and_group(&rows, &products, top_n);
            let report = publisher::publish(&api, &groups, gaps).await;

            println!(
                "Updated {} products ({} unresolved source names, {} unresolved recommendations).",
                report.updated.len(),
                report.gaps.unresolved_items,
                report.gaps.unresolved_recommendations
            );

            if !report.failed.is_empty() {
                for (product_id, error) in &report.failed {
                    eprintln!("product {product_id}: {error}");
                }
                anyhow::bail!(
                    "{} of {} cross-sell updates failed",
                    report.failed.len(),
                    groups.len()
                );
            }
        }
    }

    Ok(())
}
