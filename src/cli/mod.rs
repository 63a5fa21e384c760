use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::clients::openweather::{OpenWeatherClient, WeatherProvider};
use crate::domain::format::format_weather;
use crate::domain::Units;
use crate::infra::config::Config;

#[derive(Parser)]
#[command(name = "weather-mcp-gateway")]
#[command(about = "Weather MCP Gateway - server and admin CLI")]
#[command(version)]
pub struct Cli {
    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the server using MODE/PORT from the environment
    Serve {
        /// Override PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run the stdio transport regardless of MODE
    Stdio,
    /// Health check the service
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Show service status and configuration
    Status {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Validate configuration
    Config {
        /// Validate config without starting service
        #[arg(long)]
        validate: bool,
    },
    /// Fetch current weather through the configured upstream
    Weather {
        /// City to look up
        #[arg(short, long)]
        city: String,
        /// metric or imperial
        #[arg(short, long, default_value = "metric")]
        units: Units,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    run_commands(cli.command.unwrap_or(Commands::Serve { port: None })).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Serve { port } => {
            let mut cfg = Config::from_env();
            if let Some(port) = port {
                cfg.port = port;
            }
            serve(cfg).await
        }
        Commands::Stdio => {
            let mut cfg = Config::from_env();
            cfg.mode = "stdio".into();
            serve(cfg).await
        }
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Status { url } => match show_status(&url).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Status check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate: _ } => match Config::from_env().validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Weather { city, units } => match lookup_weather(&city, units).await {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Weather lookup failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn serve(cfg: Config) -> ExitCode {
    match crate::infra::boot::run(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

async fn probe(client: &reqwest::Client, url: &str, method: &str) -> String {
    let resp = client
        .post(format!("{}/mcp", url))
        .header("content-type", "application/json")
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": {}
        }))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await;

    match resp {
        Ok(resp) if resp.status().is_success() => "✅ Available".into(),
        Ok(resp) => format!("❌ HTTP {}", resp.status()),
        Err(_) => "❌ Unavailable".into(),
    }
}

async fn show_status(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    // Health check
    let health_response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    println!(
        "🏥 Health Status: {}",
        if health_response.status().is_success() {
            "✅ Healthy"
        } else {
            "❌ Unhealthy"
        }
    );
    println!("🔧 Tools: {}", probe(&client, url, "tools/list").await);
    println!("💬 Prompts: {}", probe(&client, url, "prompts/list").await);

    // Configuration summary
    let cfg = Config::from_env();
    println!("\n📋 Configuration:");
    println!("  Mode: {}", cfg.mode);
    println!("  Port: {}", cfg.port);
    println!(
        "  Log Level: {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    );
    if cfg.uses_mock_weather() {
        println!("  Weather Data: mock (OPENWEATHER_API_KEY not set)");
    } else {
        println!("  Weather Data: {}", cfg.weather_base_url);
    }

    Ok(())
}

async fn lookup_weather(city: &str, units: Units) -> Result<String, Box<dyn std::error::Error>> {
    let client = OpenWeatherClient::from_config(&Config::from_env())?;
    let record = client.fetch(city, units).await?;
    Ok(format_weather(&record))
}
