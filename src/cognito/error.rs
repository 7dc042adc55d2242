use thiserror::Error;

/// Provider failures this gateway reacts to, plus a catch-all.
///
/// The set is closed on purpose: every endpoint switches over these variants
/// explicitly, so an unhandled provider code lands in `Other` and surfaces
/// as an internal error.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("not authorized: {0}")]
    NotAuthorized(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("user not confirmed: {0}")]
    UserNotConfirmed(String),

    #[error("username exists: {0}")]
    UsernameExists(String),

    #[error("invalid password: {0}")]
    InvalidPassword(String),

    #[error("code mismatch: {0}")]
    CodeMismatch(String),

    #[error("code expired: {0}")]
    ExpiredCode(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider error {0}: {1}")]
    Other(String, String),
}

impl ProviderError {
    /// Map a provider error payload to a variant. `__type` may be a bare
    /// exception name or namespaced (`com.amazonaws...#Name`).
    pub(crate) fn from_response(error_type: &str, message: String) -> Self {
        let name = error_type.rsplit('#').next().unwrap_or(error_type);
        match name {
            "NotAuthorizedException" => ProviderError::NotAuthorized(message),
            "UserNotFoundException" => ProviderError::UserNotFound(message),
            "UserNotConfirmedException" => ProviderError::UserNotConfirmed(message),
            "UsernameExistsException" => ProviderError::UsernameExists(message),
            "InvalidPasswordException" => ProviderError::InvalidPassword(message),
            "CodeMismatchException" => ProviderError::CodeMismatch(message),
            "ExpiredCodeException" => ProviderError::ExpiredCode(message),
            "LimitExceededException" => ProviderError::LimitExceeded(message),
            other => ProviderError::Other(other.to_string(), message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_mapped() {
        let err = ProviderError::from_response("NotAuthorizedException", "bad".into());
        assert!(matches!(err, ProviderError::NotAuthorized(_)));

        let err = ProviderError::from_response("UserNotFoundException", "who".into());
        assert!(matches!(err, ProviderError::UserNotFound(_)));

        let err = ProviderError::from_response("LimitExceededException", "slow down".into());
        assert!(matches!(err, ProviderError::LimitExceeded(_)));
    }

    #[test]
    fn test_namespaced_type_stripped() {
        let err = ProviderError::from_response(
            "com.amazonaws.cognito#UserNotConfirmedException",
            "pending".into(),
        );
        assert!(matches!(err, ProviderError::UserNotConfirmed(_)));
    }

    #[test]
    fn test_unknown_code_is_other() {
        let err = ProviderError::from_response("TooManyFailedAttemptsException", "x".into());
        assert!(matches!(err, ProviderError::Other(_, _)));
    }
}
