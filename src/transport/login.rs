use crate::domain::{Credential, Password, SessionKey, UserKey, Username, ValidationError};

use super::TransportError;

const CREDENTIAL_DELIMITER: char = ';';
const CREDENTIAL_ELEMENTS: usize = 2;

pub fn encode_login_query(username: &Username, password: &Password) -> Vec<(String, String)> {
    vec![
        (Username::FIELD.to_owned(), username.as_str().to_owned()),
        (Password::FIELD.to_owned(), password.as_str().to_owned()),
    ]
}

/// Decode the login body into a credential.
///
/// The gateway answers either `user_key;session_key` or a JSON array of the
/// same two strings. Order is the contract; there are no field names.
pub fn decode_login_response(body: &str) -> Result<Credential, TransportError> {
    let trimmed = body.trim();
    let parts: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)?
    } else {
        trimmed
            .split(CREDENTIAL_DELIMITER)
            .map(str::to_owned)
            .collect()
    };

    if parts.len() != CREDENTIAL_ELEMENTS {
        return Err(TransportError::Credential(
            ValidationError::CredentialShape {
                expected: CREDENTIAL_ELEMENTS,
                actual: parts.len(),
            },
        ));
    }

    let mut parts = parts.into_iter();
    let user_key = UserKey::new(parts.next().unwrap_or_default())?;
    let session_key = SessionKey::new(parts.next().unwrap_or_default())?;

    Ok(Credential {
        user_key,
        session_key,
    })
}
