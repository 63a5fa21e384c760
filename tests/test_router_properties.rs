use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value as J};
use tokio::sync::Barrier;

use weather_mcp_gateway::clients::openweather::{WeatherError, WeatherProvider};
use weather_mcp_gateway::core::mcp::RpcReq;
use weather_mcp_gateway::domain::{Units, WeatherRecord};
use weather_mcp_gateway::tools::mcp_router::McpRouter;

/// Records every fetch. When a barrier is set, each fetch waits for all its
/// siblings, so sequential fetching would never complete.
struct RecordingProvider {
    calls: Mutex<Vec<(String, Units)>>,
    barrier: Option<Barrier>,
    fail_city: Option<&'static str>,
}

impl RecordingProvider {
    fn new() -> Self {
        Self { calls: Mutex::new(Vec::new()), barrier: None, fail_city: None }
    }

    fn with_barrier(mut self, parties: usize) -> Self {
        self.barrier = Some(Barrier::new(parties));
        self
    }

    fn failing_on(mut self, city: &'static str) -> Self {
        self.fail_city = Some(city);
        self
    }

    fn calls(&self) -> Vec<(String, Units)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for RecordingProvider {
    async fn fetch(&self, city: &str, units: Units) -> Result<WeatherRecord, WeatherError> {
        self.calls.lock().unwrap().push((city.to_string(), units));
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if self.fail_city == Some(city) {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }
        Ok(WeatherRecord {
            city: city.to_string(),
            country: "ZZ".into(),
            temperature: 18.0,
            feels_like: 17.0,
            humidity: 50,
            pressure: 1015,
            description: "clear sky".into(),
            wind_speed: 2.0,
            wind_deg: 90,
            visibility: 10_000,
            units,
            timestamp: Utc::now(),
        })
    }
}

fn req(id: J, method: &str, params: J) -> RpcReq {
    RpcReq::new(Some(id), method, Some(params))
}

async fn handle_with_deadline(router: &McpRouter, r: RpcReq) -> weather_mcp_gateway::core::mcp::RpcResp {
    tokio::time::timeout(Duration::from_secs(5), router.handle(r))
        .await
        .expect("fetches did not run concurrently")
}

#[tokio::test]
async fn travel_advice_fetches_all_cities_concurrently() {
    let provider = Arc::new(RecordingProvider::new().with_barrier(3));
    let router = McpRouter::new(provider.clone());

    let resp = handle_with_deadline(
        &router,
        req(json!(1), "prompts/get", json!({"name": "travel-weather-advice", "arguments": {"cities": "A,B,C"}})),
    )
    .await;

    assert!(resp.error.is_none(), "unexpected error: {:?}", resp.error);
    let mut calls = provider.calls();
    calls.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        calls,
        vec![("A".into(), Units::Metric), ("B".into(), Units::Metric), ("C".into(), Units::Metric)]
    );
    let text = resp.result.unwrap()["messages"][0]["content"]["text"].as_str().unwrap().to_string();
    assert!(text.contains("Weather in A, ZZ:"));
    assert!(text.contains("Weather in C, ZZ:"));
    assert!(text.contains("on today."));
}

#[tokio::test]
async fn travel_advice_fails_whole_call_when_one_city_fails() {
    let provider = Arc::new(RecordingProvider::new().with_barrier(3).failing_on("B"));
    let router = McpRouter::new(provider.clone());

    let resp = handle_with_deadline(
        &router,
        req(json!("t"), "prompts/get", json!({"name": "travel-weather-advice", "arguments": {"cities": "A,B,C"}})),
    )
    .await;

    assert_eq!(resp.id, Some(json!("t")));
    assert!(resp.result.is_none());
    let err = resp.error.unwrap();
    assert_eq!(err.code, -32603);
    assert!(err.message.contains("City \"B\" not found"));
    // Every fetch still ran to completion.
    assert_eq!(provider.calls().len(), 3);
}

#[tokio::test]
async fn comparison_always_fetches_metric() {
    let provider = Arc::new(RecordingProvider::new().with_barrier(2));
    let router = McpRouter::new(provider.clone());

    let resp = handle_with_deadline(
        &router,
        req(
            json!(2),
            "prompts/get",
            json!({"name": "weather-comparison", "arguments": {"city1": "Paris", "city2": "Tokyo", "units": "imperial"}}),
        ),
    )
    .await;

    let text = resp.result.unwrap()["messages"][0]["content"]["text"].as_str().unwrap().to_string();
    assert!(text.contains("**Paris:**"));
    assert!(text.contains("**Tokyo:**"));
    assert!(provider.calls().iter().all(|(_, units)| *units == Units::Metric));
    assert_eq!(provider.calls().len(), 2);
}

#[tokio::test]
async fn weather_report_honours_requested_units() {
    let provider = Arc::new(RecordingProvider::new());
    let router = McpRouter::new(provider.clone());

    let resp = router
        .handle(req(json!(3), "prompts/get", json!({"name": "weather-report", "arguments": {"city": "Denver", "units": "imperial"}})))
        .await;

    assert!(resp.result.is_some());
    assert_eq!(provider.calls(), vec![("Denver".to_string(), Units::Imperial)]);
}

#[tokio::test]
async fn tools_call_defaults_units_to_metric() {
    let provider = Arc::new(RecordingProvider::new());
    let router = McpRouter::new(provider.clone());

    router
        .handle(req(json!(4), "tools/call", json!({"name": "get-weather", "arguments": {"city": "Kyiv"}})))
        .await;

    assert_eq!(provider.calls(), vec![("Kyiv".to_string(), Units::Metric)]);
}

#[tokio::test]
async fn rejected_shapes_never_reach_the_provider() {
    let provider = Arc::new(RecordingProvider::new());
    let router = McpRouter::new(provider.clone());

    let bad = [
        json!({"arguments": {"city": "Oslo"}}),
        json!({"name": "get-weather", "arguments": {"units": "metric"}}),
        json!({"name": "get-weather", "arguments": {"city": "Oslo", "units": "kelvin"}}),
        json!({"name": "unknown-tool", "arguments": {}}),
    ];
    for params in bad {
        let resp = router.handle(req(json!(5), "tools/call", params)).await;
        assert_eq!(resp.error.unwrap().code, -32602);
    }
    let resp = router.handle(req(json!(6), "tools/call", json!("not an object"))).await;
    assert_eq!(resp.error.unwrap().code, -32602);

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn every_method_mirrors_id_and_keeps_result_error_exclusive() {
    let router = McpRouter::new(Arc::new(RecordingProvider::new()));
    let cases = [
        ("initialize", json!({})),
        ("tools/list", json!({})),
        ("tools/call", json!({"name": "get-weather", "arguments": {"city": "Lima"}})),
        ("prompts/list", json!({})),
        ("prompts/get", json!({"name": "weather-report"})),
        ("nope", json!({})),
    ];

    for (i, (method, params)) in cases.into_iter().enumerate() {
        for id in [json!(i), json!(format!("id-{i}"))] {
            let resp = router.handle(req(id.clone(), method, params.clone())).await;
            assert_eq!(resp.id, Some(id), "{method}");
            assert!(resp.result.is_some() != resp.error.is_some(), "{method}");
        }
        let resp = router.handle(RpcReq::new(None, method, Some(params))).await;
        assert!(resp.id.is_none(), "{method}");
    }
}
