//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod login;
mod send_sms;

use crate::domain::ValidationError;

pub use login::{decode_login_response, encode_login_query};
pub use send_sms::{decode_send_sms_json_response, encode_send_sms_json, encode_session_headers};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid credential: {0}")]
    Credential(#[from] ValidationError),
}
