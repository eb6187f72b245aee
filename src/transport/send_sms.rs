use serde::Serialize;

use crate::domain::{Credential, MessageQuality, OutboundMessage, SendResponse, SessionKey, UserKey};

use super::TransportError;

#[derive(Debug, Serialize)]
struct SendSmsJsonRequest<'a> {
    message_type: &'static str,
    recipient: [String; 1],
    message: &'a str,
}

pub fn encode_send_sms_json(
    quality: MessageQuality,
    message: &OutboundMessage,
) -> Result<String, TransportError> {
    let payload = SendSmsJsonRequest {
        message_type: quality.code(),
        recipient: [message.recipient().to_wire()],
        message: message.text().as_str(),
    };
    Ok(serde_json::to_string(&payload)?)
}

pub fn encode_session_headers(credential: &Credential) -> Vec<(String, String)> {
    vec![
        (
            UserKey::FIELD.to_owned(),
            credential.user_key.as_str().to_owned(),
        ),
        (
            SessionKey::FIELD.to_owned(),
            credential.session_key.as_str().to_owned(),
        ),
    ]
}

pub fn decode_send_sms_json_response(json: &str) -> Result<SendResponse, TransportError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn encode_payload_prefixes_recipient_and_sets_quality() {
        let msg = OutboundMessage::parse("393331234567", "hello").unwrap();
        let body = encode_send_sms_json(MessageQuality::High, &msg).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "message_type": "GP",
                "recipient": ["+393331234567"],
                "message": "hello"
            })
        );
    }

    #[test]
    fn encode_payload_uses_configured_quality() {
        let msg = OutboundMessage::parse("393331234567", "hello").unwrap();
        let body = encode_send_sms_json(MessageQuality::Low, &msg).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["message_type"], "SI");
    }

    #[test]
    fn session_headers_carry_both_keys() {
        let credential = Credential {
            user_key: UserKey::new("UK").unwrap(),
            session_key: SessionKey::new("SK").unwrap(),
        };
        assert_eq!(
            encode_session_headers(&credential),
            vec![
                ("user_key".to_owned(), "UK".to_owned()),
                ("session_key".to_owned(), "SK".to_owned()),
            ]
        );
    }

    #[test]
    fn decode_response_is_verbatim() {
        let body = r#"{"result":"OK","order_id":"abc","internal_order_id":"x1"}"#;
        let value = decode_send_sms_json_response(body).unwrap();
        assert_eq!(
            value,
            json!({"result": "OK", "order_id": "abc", "internal_order_id": "x1"})
        );
    }

    #[test]
    fn decode_response_rejects_non_json() {
        assert!(matches!(
            decode_send_sms_json_response("<html>oops</html>"),
            Err(TransportError::Json(_))
        ));
    }
}
