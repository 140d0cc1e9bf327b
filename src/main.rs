use anyhow::Result;
use std::process::ExitCode;

/// Main entry point
#[tokio::main]
async fn main() -> Result<ExitCode> {
    trendscope::cli::run().await
}
