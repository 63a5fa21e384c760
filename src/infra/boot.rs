use std::sync::Arc;

use crate::clients::openweather::OpenWeatherClient;
use crate::infra::config::Config;
use crate::tools::mcp_router::McpRouter;

/// Build the weather client and router once for the process lifetime.
pub fn build_router(cfg: &Config) -> anyhow::Result<McpRouter> {
    let client = OpenWeatherClient::from_config(cfg)?;
    if client.is_mock() {
        tracing::warn!("OPENWEATHER_API_KEY not set; serving mock weather data");
    }
    Ok(McpRouter::new(Arc::new(client)))
}

pub async fn run(cfg: Config) -> anyhow::Result<()> {
    cfg.validate()?;
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        mock_weather = cfg.uses_mock_weather(),
        "BOOT weather-mcp-gateway"
    );

    let router = build_router(&cfg)?;

    if cfg.is_stdio() {
        return crate::api::mcp::stdio_loop(router).await;
    }

    let app = crate::infra::http_app::build_app(router);
    let addr = cfg.bind_socket();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening for MCP over HTTP");
    axum::serve(listener, app).await?;
    Ok(())
}
