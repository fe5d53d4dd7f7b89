use catalog_fetch::utils::logger;
use catalog_fetch::{
    CliConfig, FetchEngine, FetchError, FetchSettings, HttpPageSource, LocalStorage,
    PaginatedFetcher,
};
use clap::Parser;

async fn run(settings: FetchSettings) -> catalog_fetch::Result<()> {
    let source = HttpPageSource::new(&settings.user_agent)?;
    let storage = LocalStorage::new(settings.output_path.clone());
    let engine = FetchEngine::new(PaginatedFetcher::new(source, settings), storage);

    let summary = engine.run().await?;
    tracing::info!("✅ Fetch completed: {} records", summary.record_count);
    println!("📁 Output saved to: {}", summary.output_path);
    Ok(())
}

fn report(e: &FetchError) {
    tracing::error!("❌ Fetch failed: {}", e);
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let result = match config.resolve_settings() {
        Ok(settings) => run(settings).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }

    Ok(())
}
