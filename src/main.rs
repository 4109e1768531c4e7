//! Dripcheck - Outfit Roulette
//!
//! Loads the apparel catalog once, then either serves the web API or rolls a
//! single outfit and prints its share message.

use clap::Parser;
use dripcheck::models::DEFAULT_BUDGET;
use dripcheck::web::CatalogStats;
use dripcheck::{
    format_share_message, load_from_path, share_url, CategoryIndex, ImageHostClient, OutfitSession,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;

/// Outfit roulette - random outfits from an apparel catalog within a budget
#[derive(Parser, Debug)]
#[command(name = "dripcheck")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the apparel catalog CSV
    #[arg(short, long, default_value = "data/updated_apparel.csv")]
    catalog: PathBuf,

    /// Budget for a one-shot roll
    #[arg(short, long, default_value_t = DEFAULT_BUDGET)]
    budget: u64,

    /// Seed for a reproducible one-shot roll
    #[arg(long)]
    seed: Option<u64>,

    /// Serve the web API on the specified port instead of rolling once
    #[arg(long)]
    web_port: Option<u16>,

    /// Public key for the image host API
    #[arg(long, env = "IMAGE_HOST_PUBLIC_KEY")]
    image_host_public_key: Option<String>,

    /// Secret key for the image host API
    #[arg(long, env = "IMAGE_HOST_SECRET_KEY", hide_env_values = true)]
    image_host_secret_key: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Starting dripcheck...");

    let load = match load_from_path(&args.catalog) {
        Ok(load) => load,
        Err(e) => {
            log::error!("Failed to load catalog: {}", e);
            std::process::exit(1);
        }
    };

    let source = args.catalog.display().to_string();
    let stats = CatalogStats::new(source, &load);
    log::info!(
        "Catalog ready: {} items, {} warnings",
        stats.items,
        stats.warnings
    );
    let index = Arc::new(load.index);

    if let Some(port) = args.web_port {
        let image_host = match (args.image_host_public_key, args.image_host_secret_key) {
            (Some(public_key), Some(secret_key)) => {
                Some(ImageHostClient::new(public_key, secret_key))
            }
            _ => {
                log::warn!("Image host keys not set, /api/images is disabled");
                None
            }
        };

        if let Err(e) = dripcheck::web::serve(index, stats, image_host, port).await {
            log::error!("Web server error: {}", e);
            std::process::exit(1);
        }
    } else {
        roll_once(index, args.budget, args.seed);
    }
}

/// Roll one outfit and print its share message and link
fn roll_once(index: Arc<CategoryIndex>, budget: u64, seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut session = OutfitSession::new(index, budget);
    let outfit = session.reroll_all(&mut rng);

    if outfit.is_empty() {
        log::warn!("Nothing in the catalog fits a budget of {}", budget);
    }

    let message = format_share_message(outfit);
    println!("{message}");
    println!();
    println!("Share: {}", share_url(&message));
}
