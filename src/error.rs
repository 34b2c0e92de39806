use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Request {request_id} for book {book_id} was superseded by a newer request")]
    Superseded { book_id: String, request_id: u64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ExtractError> for ApiError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            ExtractError::Superseded {
                book_id,
                request_id,
            } => ApiError::Superseded {
                book_id,
                request_id,
            },
            ExtractError::Task(msg) => ApiError::Internal(msg),
        }
    }
}

/// Errors fetching cover bytes from a remote host.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Cover host returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Cover exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Cover URL not allowed: {0}")]
    Disallowed(String),
}

/// Errors from an ambient extraction request.
///
/// Fetch and decode problems are not here: they degrade to the genre
/// fallback palette instead of failing the request.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Request {request_id} for book {book_id} was superseded")]
    Superseded { book_id: String, request_id: u64 },

    #[error("Analysis task failed: {0}")]
    Task(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Superseded { .. } => (StatusCode::CONFLICT, self.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_bad_request() {
        let error = ApiError::BadRequest("book_id is required".to_string());
        assert_eq!(error.to_string(), "Bad request: book_id is required");
    }

    #[test]
    fn test_api_error_not_found() {
        let error = ApiError::NotFound;
        assert_eq!(error.to_string(), "Not found");
    }

    #[test]
    fn test_api_error_superseded() {
        let error = ApiError::Superseded {
            book_id: "b1".to_string(),
            request_id: 7,
        };
        assert_eq!(
            error.to_string(),
            "Request 7 for book b1 was superseded by a newer request"
        );
    }

    #[test]
    fn test_fetch_error_status() {
        let error = FetchError::Status {
            status: 404,
            url: "http://covers/x.png".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cover host returned 404 for http://covers/x.png"
        );
    }

    #[test]
    fn test_fetch_error_too_large() {
        let error = FetchError::TooLarge { limit: 1024 };
        assert_eq!(error.to_string(), "Cover exceeds 1024 bytes");
    }

    #[test]
    fn test_api_error_from_extract_error() {
        let api_error: ApiError = ExtractError::Superseded {
            book_id: "b".to_string(),
            request_id: 1,
        }
        .into();
        assert!(matches!(api_error, ApiError::Superseded { .. }));

        let api_error: ApiError = ExtractError::InvalidRequest("nope".to_string()).into();
        assert!(matches!(api_error, ApiError::BadRequest(_)));

        let api_error: ApiError = ExtractError::Task("panicked".to_string()).into();
        assert!(matches!(api_error, ApiError::Internal(_)));
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        use axum::response::IntoResponse;

        // BadRequest -> BAD_REQUEST
        let response = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // NotFound -> NOT_FOUND
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Superseded -> CONFLICT
        let response = ApiError::Superseded {
            book_id: "b".to_string(),
            request_id: 2,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        // Internal -> INTERNAL_SERVER_ERROR
        let response = ApiError::Internal("error".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
