use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Skebby account username.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Query parameter name used by the login endpoint (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Skebby account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
/// The `Debug` output never contains the password itself.
pub struct Password(String);

impl Password {
    /// Query parameter name used by the login endpoint (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// User key returned by the login endpoint (first element of the credential pair).
///
/// Invariant: non-empty after trimming.
pub struct UserKey(String);

impl UserKey {
    /// Header name used by the send endpoint (`user_key`).
    pub const FIELD: &'static str = "user_key";

    /// Create a validated [`UserKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the user key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Session key returned by the login endpoint (second element of the credential pair).
///
/// Invariant: non-empty after trimming.
pub struct SessionKey(String);

impl SessionKey {
    /// Header name used by the send endpoint (`session_key`).
    pub const FIELD: &'static str = "session_key";

    /// Create a validated [`SessionKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the session key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient number as received from the caller (`number`).
///
/// Invariant: non-empty after trimming. No normalization is performed: the
/// transmitted value is always `+` followed by this raw value, see
/// [`RecipientNumber::to_wire`].
pub struct RecipientNumber(String);

impl RecipientNumber {
    /// Field name used by inbound relay requests (`number`).
    pub const FIELD: &'static str = "number";

    /// Create a validated (non-empty) recipient number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as received.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Value placed in the `recipient` array of the send payload.
    pub fn to_wire(&self) -> String {
        format!("+{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`message`).
///
/// Invariant: non-empty after trimming. The value as given (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Field name used by both the relay request and the send payload (`message`).
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
