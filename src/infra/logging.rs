pub fn init() {
    // Initialize tracing subscriber once, honoring RUST_LOG if set.
    // Logs go to stderr: in stdio mode stdout carries protocol frames only.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Record a histogram sample and mirror it to the log.
pub fn log_metric(scope: &str, metric: &str, value: f64) {
    metrics::histogram!(
        "weather_gateway_metric",
        "scope" => scope.to_owned(),
        "metric" => metric.to_owned()
    )
    .record(value);
    tracing::debug!(scope = scope, metric = metric, value = value, "metric");
}

/// Bump a labelled counter, e.g. upstream failures by kind.
pub fn count(name: &'static str, kind: &'static str) {
    metrics::counter!(name, "kind" => kind).increment(1);
    tracing::debug!(counter = name, kind = kind, "metric");
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
    }

    #[test]
    fn metrics_without_recorder_are_noops() {
        super::log_metric("weather.fetch", "latency_ms", 12.0);
        super::count("weather_fetch_errors_total", "not_found");
    }
}
