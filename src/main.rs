use tracing::info;
use tracing_subscriber::EnvFilter;

use copper_relay::config::Config;
use copper_relay::server;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv::dotenv().ok();

    // Setup logging
    std::env::set_var("RUST_LOG", "copper_relay=info,rocket=warn,reqwest=warn");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("copper_relay=info".parse()?))
        .init();

    let config = Config::from_env()?;
    info!(
        "Relaying Copper requests for {} on port {}",
        config.user_email, config.port
    );

    let _rocket = server::build_rocket(config).launch().await?;

    Ok(())
}
