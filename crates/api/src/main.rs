use anyhow::Context;

use minimart_api::config::ApiConfig;
use minimart_infra::CommerceStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    minimart_observability::init(config.log_format);

    let app = minimart_api::app::build_app(CommerceStore::arc());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
