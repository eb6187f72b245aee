use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    UnknownQuality { input: String },
    CredentialShape { expected: usize, actual: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::UnknownQuality { input } => write!(f, "unknown message quality: {input}"),
            Self::CredentialShape { expected, actual } => {
                write!(
                    f,
                    "credential must have {expected} elements, got {actual}"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "number" };
        assert_eq!(err.to_string(), "number must not be empty");

        let err = ValidationError::UnknownQuality {
            input: "ultra".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown message quality: ultra");

        let err = ValidationError::CredentialShape {
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "credential must have 2 elements, got 3");
    }
}
