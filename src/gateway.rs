//! Inbound request boundary: validates relay requests, invokes the client and
//! maps the outcome to an HTTP-shaped response.
//!
//! This layer is transport-agnostic; `src/main.rs` serves it over HTTP.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::client::SkebbyClient;
use crate::domain::OutboundMessage;

/// Body returned with 400 when the inbound request lacks `number` or `message`.
pub const INVALID_REQUEST_MESSAGE: &str = "Sembra che i dati inviati non siano corretti";

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub http_method: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: String,
}

impl GatewayResponse {
    fn preflight() -> Self {
        Self {
            status_code: 200,
            headers: CORS_HEADERS.to_vec(),
            body: String::new(),
        }
    }

    fn invalid_request() -> Self {
        Self {
            status_code: 400,
            headers: Vec::new(),
            body: INVALID_REQUEST_MESSAGE.to_owned(),
        }
    }

    fn json(status_code: u16, body: String) -> Self {
        Self {
            status_code,
            headers: vec![("Content-Type", "application/json")],
            body,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RelayRequest {
    #[serde(default)]
    number: Option<NumberField>,
    #[serde(default)]
    message: Option<String>,
}

/// Callers send the number either as a JSON string or as a bare JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberField {
    Text(String),
    Numeric(serde_json::Number),
}

impl NumberField {
    fn into_string(self) -> String {
        match self {
            Self::Text(value) => value,
            Self::Numeric(value) => value.to_string(),
        }
    }
}

fn parse_request(body: &str) -> Option<OutboundMessage> {
    let request: RelayRequest = serde_json::from_str(body).ok()?;
    let number = request.number?.into_string();
    let message = request.message?;
    OutboundMessage::parse(number, message).ok()
}

/// Handle one inbound relay request.
///
/// - any method other than `POST` gets the CORS preflight answer (200),
/// - a body without a usable `number`/`message` gets 400 with
///   [`INVALID_REQUEST_MESSAGE`],
/// - a successful send gets 200 with the gateway reply as JSON,
/// - a failed send gets 400 with the error text as a JSON string.
pub async fn handle(client: &SkebbyClient, event: InboundEvent) -> GatewayResponse {
    if !event.http_method.eq_ignore_ascii_case("POST") {
        debug!(method = %event.http_method, "answering preflight");
        return GatewayResponse::preflight();
    }

    let Some(message) = parse_request(&event.body) else {
        debug!("rejecting relay request with missing fields");
        return GatewayResponse::invalid_request();
    };

    match client.send_message(&message).await {
        Ok(reply) => GatewayResponse::json(200, reply.to_string()),
        Err(err) => {
            warn!(error = %err, "relay request failed");
            let body = serde_json::Value::String(err.to_string()).to_string();
            GatewayResponse::json(400, body)
        }
    }
}
