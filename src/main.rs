use scrape_probe::client::{HttpScrapeClient, PollSettings};
use scrape_probe::config::{load_or_default, DEFAULT_CONFIG_PATH};
use scrape_probe::report::render_summary;
use scrape_probe::worker::run_all;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config = match load_or_default(DEFAULT_CONFIG_PATH) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let client = match HttpScrapeClient::new(&config.base_url) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return;
        }
    };

    info!("Scraping service at {}", client.base_url());
    let settings = PollSettings {
        interval: config.poll_interval(),
        max_attempts: config.max_poll_attempts,
    };

    let outcomes = run_all(client, config.requests(), settings, config.concurrency_limit()).await;

    println!("{}", render_summary(&outcomes));
    println!("All scraping requests have been processed.");
}
