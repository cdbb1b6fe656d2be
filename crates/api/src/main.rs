use stockroom_api::config::Config;
use stockroom_api::notify::NotifyHub;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    // Configuration failures are the only fatal path.
    let config = Config::load()?;

    let notify = NotifyHub::bind(&config.notify_addr).await?;
    tracing::info!("notification channel listening on {}", notify.local_addr());

    let app = stockroom_api::app::build_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(&config.api_addr).await?;
    tracing::info!("REST API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
