use std::time::Duration;

/// Per-request ceiling for upstream weather calls.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Build a reqwest client with the upstream timeouts applied.
pub fn make_http_client() -> reqwest::Result<reqwest::Client> {
    make_http_client_with(UPSTREAM_TIMEOUT)
}

pub fn make_http_client_with(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .timeout(timeout)
        .build()
}
