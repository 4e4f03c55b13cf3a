use thiserror::Error;

use crate::api::ApiError;
use crate::auth::Field;

#[derive(Error, Debug)]
pub enum LoginError {
    /// A credential field was left empty; nothing was sent.
    #[error("Missing {} field", .field.label())]
    Validation { field: Field },

    /// The backend refused the credentials.
    #[error("{0}")]
    Auth(String),

    #[error(transparent)]
    Api(ApiError),

    #[error("Failed to store session cookie: {0:#}")]
    Storage(anyhow::Error),
}

impl From<ApiError> for LoginError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { message, .. } => LoginError::Auth(message),
            other => LoginError::Api(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_becomes_auth_error() {
        let api = ApiError::from_status(reqwest::StatusCode::UNAUTHORIZED, r#"{"message":"bad credentials"}"#);
        let err = LoginError::from(api);
        assert!(matches!(err, LoginError::Auth(ref m) if m == "bad credentials"));
    }

    #[test]
    fn test_invalid_response_stays_api_error() {
        let err = LoginError::from(ApiError::InvalidResponse("garbage".into()));
        assert!(matches!(err, LoginError::Api(_)));
    }

    #[test]
    fn test_validation_message() {
        let err = LoginError::Validation { field: Field::Password };
        assert_eq!(err.to_string(), "Missing password field");
    }
}
