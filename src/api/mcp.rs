//! Transport adapters. Both only (de)serialize envelopes; all protocol
//! behaviour lives in [`McpRouter`].

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::infra::http::json::decode_request;
use crate::tools::mcp_router::McpRouter;

// HTTP handler: one POST body in, one envelope out.
pub async fn http(State(router): State<McpRouter>, body: Bytes) -> Response {
    match decode_request(&body) {
        Ok(req) => {
            tracing::debug!(method = %req.method, id = ?req.id, "HTTP handler invoked");
            Json(router.handle(req).await).into_response()
        }
        Err(resp) => {
            tracing::warn!(error = ?resp.error, "rejecting undecodable HTTP body");
            (StatusCode::BAD_REQUEST, Json(resp)).into_response()
        }
    }
}

/// Newline-delimited JSON-RPC: one request per line in, one response per
/// line out. Lines are read as raw bytes so a malformed line (including
/// invalid UTF-8) is answered with an error envelope. Returns on EOF; only
/// I/O errors end the loop early.
pub async fn serve_lines<R, W>(router: &McpRouter, mut reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let resp = match decode_request(&buf) {
            Ok(req) => router.handle(req).await,
            Err(resp) => resp,
        };

        let mut out = serde_json::to_vec(&resp)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
    }
    Ok(())
}

// Stdio loop
pub async fn stdio_loop(router: McpRouter) -> anyhow::Result<()> {
    tracing::info!("serving MCP over stdio");
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve_lines(&router, stdin, stdout).await?;
    tracing::info!("stdin closed; stdio loop finished");
    Ok(())
}
