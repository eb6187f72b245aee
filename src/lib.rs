//! Session-authenticated relay client for the Skebby SMS HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for wire-format quirks, a client layer owning the gateway session, and a
//! thin `gateway` boundary that turns inbound relay requests into sends.
//!
//! ```rust,no_run
//! use skebby::{Account, OutboundMessage, SkebbyClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), skebby::SkebbyError> {
//!     let account = Account::new("username", "password")?;
//!     let client = SkebbyClient::new("https://api.skebby.it/API/v1.0/REST", account)?;
//!     let message = OutboundMessage::parse("393331234567", "hello")?;
//!     let _reply = client.send_message(&message).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
pub mod gateway;
mod transport;

pub use client::{Account, RequestError, SkebbyClient, SkebbyClientBuilder, SkebbyError};
pub use config::GatewayConfig;
pub use domain::{
    Credential, MessageQuality, MessageText, OutboundMessage, Password, RecipientNumber,
    SendResponse, SessionKey, UserKey, Username, ValidationError,
};
pub use gateway::{GatewayResponse, InboundEvent};
