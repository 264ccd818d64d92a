use sea_orm::Database;
use tracing::info;

use tvlink_core::config::Config;
use tvlink_core::tracing::init_tracing;

use tvlink_dashboard::config::DashboardConfig;
use tvlink_dashboard::infra::relay::RelayClient;
use tvlink_dashboard::router::build_router;
use tvlink_dashboard::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = DashboardConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let relay = RelayClient::new(
        config.activation_relay_url.as_deref(),
        config.relay_timeout(),
    )
    .expect("invalid ACTIVATION_RELAY_URL");
    if config.activation_relay_url.is_none() {
        tracing::warn!("ACTIVATION_RELAY_URL unset; activations will be rejected");
    }

    let state = AppState {
        db,
        relay,
        secure_cookies: config.session_cookie_secure,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.dashboard_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("dashboard listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
