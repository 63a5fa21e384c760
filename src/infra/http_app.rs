use axum::{
    routing::{get, post},
    Router,
};

use crate::tools::mcp_router::McpRouter;

/// `/healthz` plus the JSON-RPC endpoint at `/mcp`.
pub fn build_app(router: McpRouter) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/mcp", post(crate::api::mcp::http))
        .with_state(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use hyper::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::clients::openweather::OpenWeatherClient;

    #[tokio::test]
    async fn healthz_returns_ok() {
        let client = OpenWeatherClient::new("http://localhost:9", None).unwrap();
        let app = build_app(McpRouter::new(Arc::new(client)));
        let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert!(resp.status().is_success());
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"ok");
    }
}
