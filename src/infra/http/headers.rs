//! Headers attached to every upstream weather call.

use chrono::Utc;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::RequestBuilder;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Correlation id for one upstream call, e.g. `wx-20261019T101500.123456789`.
pub fn upstream_request_id() -> String {
    Utc::now().format("wx-%Y%m%dT%H%M%S%.9f").to_string()
}

/// Tag an upstream request with a correlation id, our user agent and a JSON
/// accept header. The id is returned so failures can be logged against it.
pub fn tag_upstream(builder: RequestBuilder, request_id: Option<String>) -> (RequestBuilder, String) {
    let rid = request_id.unwrap_or_else(upstream_request_id);
    let builder = builder
        .header(REQUEST_ID_HEADER, rid.as_str())
        .header(USER_AGENT, AGENT)
        .header(ACCEPT, "application/json");
    (builder, rid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_the_weather_prefix_and_differ() {
        let a = upstream_request_id();
        assert!(a.starts_with("wx-"));
        std::thread::sleep(std::time::Duration::from_millis(1));
        assert_ne!(a, upstream_request_id());
    }

    #[test]
    fn it_tags_request_with_all_headers() {
        let client = reqwest::Client::new();
        let (builder, rid) = tag_upstream(client.get("http://localhost/weather"), Some("fixed".into()));
        assert_eq!(rid, "fixed");
        let req = builder.build().unwrap();
        assert_eq!(req.headers()[REQUEST_ID_HEADER], "fixed");
        assert_eq!(req.headers()[ACCEPT], "application/json");
        assert!(req.headers()[USER_AGENT]
            .to_str()
            .unwrap()
            .starts_with("weather-mcp-gateway/"));
    }
}
