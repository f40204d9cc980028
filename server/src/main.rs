use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use portal_server::config::Config;
use portal_server::routes::create_routes;
use portal_server::state::AppState;
use portal_server::store;

const DEFAULT_LOG_FILTER: &str = "portal_server=info,tower_http=info";

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env();

    let pool = store::init(&config.database_url, config.admin.as_ref())
        .await
        .expect("Failed to prepare database");

    tracing::info!("Database ready, migrations applied");

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .expect("Failed to create upload directory");

    let addr = config.bind_addr;
    let app = create_routes(AppState::new(pool, config));

    tracing::info!("Portal running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
