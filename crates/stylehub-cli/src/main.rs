mod catalog;
mod order;
mod site;

use clap::{Parser, Subcommand};
use stylehub_api::StorefrontClient;
use stylehub_core::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stylehub")]
#[command(about = "StyleHub storefront command line client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog items with stock and discount
    Catalog {
        /// Show the featured listing instead of collections
        #[arg(long)]
        featured: bool,
        /// Show every item instead of the first page
        #[arg(long)]
        all: bool,
    },
    /// Show extended detail and gallery for one product
    Product {
        /// Product id
        id: i64,
    },
    /// Print the FAQ list
    Faqs,
    /// Print store branding settings
    Settings,
    /// Place a cash-on-delivery order
    Order(order::OrderArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = stylehub_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = build_client(&config)?;
    match cli.command {
        Commands::Catalog { featured, all } => {
            catalog::run_catalog(&client, &config, featured, all).await
        }
        Commands::Product { id } => catalog::run_product(&client, id).await,
        Commands::Faqs => site::run_faqs(&client).await,
        Commands::Settings => site::run_settings(&client).await,
        Commands::Order(args) => order::run_order(client, &config, args).await,
    }
}

fn build_client(config: &AppConfig) -> anyhow::Result<StorefrontClient> {
    StorefrontClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build storefront client: {e}"))
}
