use anyhow::{Context, Result};

use bazaar::App;
use bazaar_auth::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context("Failed to load configuration")?;

    // Logging is initialized in App::run()
    App::new(settings).run().await?;

    Ok(())
}
