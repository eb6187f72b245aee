use crate::domain::value::{SessionKey, UserKey};

/// Session credential pair obtained from the login endpoint.
///
/// The gateway protocol is positional: the first element is always the user
/// key and the second the session key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub user_key: UserKey,
    pub session_key: SessionKey,
}

/// Gateway reply to a send request, passed through without interpretation.
pub type SendResponse = serde_json::Value;
