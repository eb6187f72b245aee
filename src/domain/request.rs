use std::str::FromStr;

use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, RecipientNumber};

/// Message class marker understood by the gateway (`message_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageQuality {
    /// `GP`
    #[default]
    High,
    /// `TI`
    Medium,
    /// `SI`
    Low,
}

impl MessageQuality {
    /// Payload field name used by the send endpoint (`message_type`).
    pub const FIELD: &'static str = "message_type";

    /// Wire code sent to the gateway.
    pub fn code(self) -> &'static str {
        match self {
            Self::High => "GP",
            Self::Medium => "TI",
            Self::Low => "SI",
        }
    }
}

impl FromStr for MessageQuality {
    type Err = ValidationError;

    /// Accepts tier names (`high`, `medium`, `low`) or wire codes (`GP`, `TI`, `SI`),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "gp" => Ok(Self::High),
            "medium" | "ti" => Ok(Self::Medium),
            "low" | "si" => Ok(Self::Low),
            _ => Err(ValidationError::UnknownQuality {
                input: s.to_owned(),
            }),
        }
    }
}

/// A single outbound SMS: one recipient, one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    recipient: RecipientNumber,
    text: MessageText,
}

impl OutboundMessage {
    pub fn new(recipient: RecipientNumber, text: MessageText) -> Self {
        Self { recipient, text }
    }

    /// Validate raw caller input and build a message.
    pub fn parse(
        recipient: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            recipient: RecipientNumber::new(recipient)?,
            text: MessageText::new(text)?,
        })
    }

    pub fn recipient(&self) -> &RecipientNumber {
        &self.recipient
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }
}
