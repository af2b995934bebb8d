use anyhow::Result;
use tracing::info;
use webharvest::{api, app_state::AppState, config::Config, service::ScrapeService, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    let config = Config::from_env()?;
    info!(
        max_pages = config.max_pages(),
        timeout = ?config.timeout(),
        search_endpoint = %config.search_endpoint(),
        "configuration loaded"
    );

    let bind_addr = config.bind_addr().to_string();
    let app = api::router(AppState::new(ScrapeService::new(config)));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
