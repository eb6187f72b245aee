//! `skebby-relay`: serves the relay boundary over HTTP.

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::{HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use skebby::gateway::{self, GatewayResponse, InboundEvent};
use skebby::{GatewayConfig, SkebbyClient};

#[derive(Debug, Parser)]
#[command(name = "skebby-relay", version, about = "Relay SMS requests to the Skebby gateway")]
struct Args {
    /// Address the relay listens on.
    #[arg(long, env = "SKEBBY_RELAY_BIND", default_value = "0.0.0.0:8080")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = GatewayConfig::from_env().context("Failed to load gateway configuration")?;
    let client = config
        .build_client()
        .context("Failed to build gateway client")?;

    let app = Router::new()
        .route("/", any(relay))
        .route("/sms", any(relay))
        .with_state(client);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!(bind = %args.bind, quality = config.quality.code(), "relay listening");

    axum::serve(listener, app).await.context("Relay server failed")?;
    Ok(())
}

async fn relay(State(client): State<SkebbyClient>, method: Method, body: String) -> Response {
    let event = InboundEvent {
        http_method: method.to_string(),
        body,
    };
    into_http(gateway::handle(&client, event).await)
}

fn into_http(response: GatewayResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut http = (status, response.body).into_response();
    for (name, value) in response.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            http.headers_mut().insert(name, value);
        }
    }
    http
}
