//! Error taxonomy of the query layer.

/// Errors produced by list queries and mutations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (network down, CORS, aborted).
    #[error("Network error: {0}")]
    Transport(String),
    /// Non-2xx response; `message` is the server-provided `error` when present.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// 2xx response whose body carried an `error` field.
    #[error("{0}")]
    Rejected(String),
    /// Body did not match the expected schema.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// No access token in the credential store.
    #[error("Not authenticated")]
    Unauthenticated,
    /// Client-side check failed before any request was sent.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Message the server itself supplied, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { status, message }
                if !message.is_empty() && !is_generic_status(message, *status) =>
            {
                Some(message.as_str())
            }
            ApiError::Rejected(message) if !message.is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// Text shown in toasts: the server message when available, otherwise `fallback`.
    ///
    /// Validation messages are produced locally and always shown as-is.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::Unauthenticated => self.to_string(),
            other => other
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}

/// Message synthesized from the status code when the body had no `error`
pub(crate) fn generic_status_message(status: u16) -> String {
    format!("HTTP {}", status)
}

fn is_generic_status(message: &str, status: u16) -> bool {
    message == generic_status_message(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::Http {
            status: 409,
            message: "Email already in use".into(),
        };
        assert_eq!(err.user_message("Could not save"), "Email already in use");

        let err = ApiError::Rejected("Role is locked".into());
        assert_eq!(err.user_message("Could not save"), "Role is locked");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Http {
            status: 500,
            message: generic_status_message(500),
        };
        assert_eq!(err.user_message("Could not save"), "Could not save");
        assert_eq!(
            ApiError::Transport("fetch failed".into()).user_message("Could not save"),
            "Could not save"
        );
        assert_eq!(
            ApiError::MalformedResponse("missing field `data`".into()).user_message("Oops"),
            "Oops"
        );
    }

    #[test]
    fn test_validation_message_is_kept() {
        let err = ApiError::Validation("Select a role".into());
        assert_eq!(err.user_message("ignored"), "Select a role");
    }
}
