use anyhow::Result;
use clap::Parser;
use rastreio_zap::cli::{run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets such as VITE_API_KEY may come from a local .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    tracing::info!("CLI application startup: tracing initialised, environment loaded");

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => {
            tracing::info!("CLI completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "CLI exited with error");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
