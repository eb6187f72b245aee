//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{MessageQuality, OutboundMessage};
pub use response::{Credential, SendResponse};
pub use validation::ValidationError;
pub use value::{MessageText, Password, RecipientNumber, SessionKey, UserKey, Username};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rejects_empty() {
        assert!(matches!(
            Username::new("   "),
            Err(ValidationError::Empty {
                field: Username::FIELD
            })
        ));
    }

    #[test]
    fn password_rejects_empty() {
        assert!(matches!(
            Password::new(""),
            Err(ValidationError::Empty {
                field: Password::FIELD
            })
        ));
    }

    #[test]
    fn outbound_message_requires_number_and_text() {
        assert!(matches!(
            OutboundMessage::parse(" ", "hello"),
            Err(ValidationError::Empty {
                field: RecipientNumber::FIELD
            })
        ));
        assert!(matches!(
            OutboundMessage::parse("393331234567", "  "),
            Err(ValidationError::Empty {
                field: MessageText::FIELD
            })
        ));

        let msg = OutboundMessage::parse(" 393331234567 ", "hello").unwrap();
        assert_eq!(msg.recipient().raw(), "393331234567");
        assert_eq!(msg.text().as_str(), "hello");
    }

    #[test]
    fn quality_defaults_to_high() {
        assert_eq!(MessageQuality::default(), MessageQuality::High);
        assert_eq!(MessageQuality::default().code(), "GP");
    }

    #[test]
    fn quality_parses_names_and_codes() {
        assert_eq!("medium".parse::<MessageQuality>(), Ok(MessageQuality::Medium));
        assert_eq!("TI".parse::<MessageQuality>(), Ok(MessageQuality::Medium));
        assert_eq!(" Low ".parse::<MessageQuality>(), Ok(MessageQuality::Low));
        assert_eq!("si".parse::<MessageQuality>(), Ok(MessageQuality::Low));
        assert_eq!("GP".parse::<MessageQuality>(), Ok(MessageQuality::High));
        assert!(matches!(
            "ultra".parse::<MessageQuality>(),
            Err(ValidationError::UnknownQuality { .. })
        ));
    }
}
