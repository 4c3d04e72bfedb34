use dotenvy::dotenv;
use medibase::logging::init_tracing;
use medibase::router::init_router;
use medibase::state::init_app_state;
use medibase_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let state = init_app_state().await?;
    let app = init_router(state);

    let server_config = ServerConfig::from_env();
    let address = server_config.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(address = %address, "Server running");
    tracing::info!("Swagger UI available at http://{}/swagger-ui", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
