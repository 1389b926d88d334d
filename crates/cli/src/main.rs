use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dossier_core::{
    load_config, validate_config, IntakePipeline, SmtpNotifier, XsdValidator, ZipExtractor,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("DOSSIER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Source directory: {:?}", config.intake.source_dir);
    info!("Destination directory: {:?}", config.intake.dest_dir);
    info!("Schema: {:?}", config.intake.schema_path);

    // Create notifier
    let notifier = Arc::new(
        SmtpNotifier::new(&config.notifier).context("Failed to create mail notifier")?,
    );
    info!("Notifier initialized (relay: {})", config.notifier.host);

    // Parse the schema once; a bad schema is a startup failure, not a
    // per-archive one.
    let validator = XsdValidator::from_file(&config.intake.schema_path)
        .context("Failed to load XSD schema")?;
    info!("Schema loaded");

    // Create and run the pipeline
    let pipeline = IntakePipeline::new(
        config.intake.clone(),
        ZipExtractor::new(),
        validator,
        notifier,
    );

    // Per-archive failures are logged by the pipeline and never bubble up;
    // only startup problems produce a non-zero exit.
    let report = pipeline.run().await;
    info!(
        discovered = report.discovered,
        promoted = report.promoted,
        failed = report.failed,
        "intake pass complete"
    );

    Ok(())
}
