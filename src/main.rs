use std::error::Error;

use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file when present.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,study_core=info,note_store=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    api::start().await?;

    Ok(())
}
