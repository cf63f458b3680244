use lineupscraper::config::loader::load_config;
use lineupscraper::lineup::api::LineupAPI;
use lineupscraper::pipeline::{scrape_lineup, write_acts};
use lineupscraper::tracing::setup_tracing;
use std::error::Error;
use std::io;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let loki = setup_tracing().await;

    let result = run().await;

    if let Err(err) = &result {
        error!("Scraping failed: {}", err);
    }

    if let Some(loki) = loki {
        loki.shutdown().await;
    }

    result
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = load_config()?;

    info!("Scraping {} pages from {}", config.schedule.len(), config.base_url);

    let site = LineupAPI::new(config.base_url.clone());
    let acts = scrape_lineup(&site, &config.schedule).await?;

    write_acts(&mut io::stdout().lock(), &acts)?;

    Ok(())
}
