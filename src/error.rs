use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;

/// Rejection of a malformed transaction submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("failed to parse payload as JSON: {0}")]
    Unparsable(String),
    #[error("payload must be a JSON object with sender, recipient and amount")]
    NotAnObject,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("sender \"0\" is reserved for mining rewards")]
    ReservedSender,
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

impl ResponseError for ValidationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
