/// Launch dashboard service entry point
use launch_dashboard::clients::SpaceXClient;
use launch_dashboard::config::AppConfig;
use launch_dashboard::handlers::AppState;
use launch_dashboard::routes::build_router;
use launch_dashboard::services::DashboardService;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    let spacex_client =
        SpaceXClient::new(config.spacex_api_url.clone(), config.http_timeout_seconds)?;
    let dashboard_service = Arc::new(DashboardService::new(spacex_client));

    start_background_reload(config.refresh_seconds, dashboard_service.clone());

    let state = AppState { dashboard_service };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("launch_dashboard listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Reload launch data now and then every `interval` seconds.
/// Views render as loading until the first reload succeeds.
fn start_background_reload(interval: u64, service: Arc<DashboardService>) {
    tokio::spawn(async move {
        info!("Starting SpaceX reload task (interval: {}s)", interval);
        loop {
            if let Err(e) = service.reload().await {
                error!("SpaceX reload error: {:?}", e);
            }
            tokio::time::sleep(Duration::from_secs(interval)).await;
        }
    });
}
