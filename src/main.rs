// src/main.rs
mod app;
mod cli;
mod config;
mod constants;
mod data_fetcher;
mod error;
mod logging;
mod pipeline;

use clap::Parser;
use cli::Args;
use config::Config;
use dotenv::dotenv;
use error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Honor a .env file in the working directory for CFBD_API_KEY
    dotenv().ok();

    let args = Args::parse();
    args.validate()?;

    // Handle configuration operations without starting the pipeline
    if args.list_config {
        Config::display().await?;
        return Ok(());
    }

    if let Some(new_domain) = &args.new_api_domain {
        let mut config = Config::load().await.unwrap_or_default();
        config.api_domain = new_domain.clone();
        config.save().await?;
        println!("Config updated successfully!");
        return Ok(());
    }

    // Load config first to fail early if there's an issue
    let config = Config::load().await?;

    // The guard must be kept alive for the duration of the program
    let (log_file_path, _guard) = logging::setup_logging(&args, &config)?;
    tracing::info!("Logs are being written to: {log_file_path}");

    app::run(&args, &config).await
}
