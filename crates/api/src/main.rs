use anyhow::Context;

use stockgate_infra::GatewayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional `.env` next to the binary; real deployments inject variables.
    let _ = dotenvy::dotenv();

    stockgate_observability::init();

    let config = GatewayConfig::from_env().context("invalid gateway configuration")?;

    let app = stockgate_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
