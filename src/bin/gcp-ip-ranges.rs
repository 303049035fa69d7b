// Copyright (c) 2025 - Cowboy AI, Inc.
//! GCP IP Ranges Crawler
//!
//! Fetches https://www.gstatic.com/ipranges/cloud.json and writes prefixes,
//! services and countries to Neo4j.
//!
//! Run with: cargo run --bin gcp-ip-ranges
//!           cargo run --bin gcp-ip-ranges -- --unit-test
//!
//! Configuration comes from the environment (see `CrawlerConfig::from_env`):
//! GCP_IP_RANGES_URL, CRAWLER_LOG_DIR, CRAWLER_HTTP_TIMEOUT_SECS,
//! CRAWLER_BATCH_SIZE, NEO4J_URI, NEO4J_USER, NEO4J_PASSWORD.

use anyhow::{Context, Result};
use clap::Parser;
use gcp_ip_ranges::graph::Neo4jGraphClient;
use gcp_ip_ranges::{Crawler, CrawlerConfig, GraphClient};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Only check that a previous run left CATEGORIZED and COUNTRY relationships
    #[arg(long)]
    unit_test: bool,
}

fn init_logging(config: &CrawlerConfig) -> Result<()> {
    fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory {}", config.log_dir.display()))?;

    let log_file = config.log_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = CrawlerConfig::from_env().context("Failed to load configuration")?;

    init_logging(&config)?;

    let argv: Vec<String> = std::env::args().collect();
    info!("Started: {:?}", argv);

    let graph = Neo4jGraphClient::connect(&config.neo4j, config.batch_size)
        .await
        .context("Failed to connect to Neo4j")?;
    graph.health_check().await.context("Neo4j health check failed")?;
    info!("Connected to {}", graph.name());

    let mut crawler = Crawler::new(&config, graph).context("Failed to create crawler")?;

    if args.unit_test {
        crawler.unit_test().await.context("Unit test failed")?;
    } else {
        crawler
            .graph()
            .initialize_schema()
            .await
            .context("Failed to initialize Neo4j schema")?;

        let summary = crawler.run().await.context("Crawler run failed")?;
        info!(
            "Ingested {} records: {} prefixes, {} tags, {} countries, {} CATEGORIZED, {} COUNTRY",
            summary.records,
            summary.prefix_nodes,
            summary.tag_nodes,
            summary.country_nodes,
            summary.categorized_links,
            summary.country_links
        );
        crawler.close();
    }

    info!("Finished: {:?}", argv);
    Ok(())
}
