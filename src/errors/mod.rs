use std::io;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Custom error types for the wiki application
#[derive(Debug)]
pub enum WikiError {
    Io(io::Error),
    NotFound,
    InvalidPageName(String),
    Unauthorized,
}

impl From<io::Error> for WikiError {
    fn from(err: io::Error) -> Self {
        WikiError::Io(err)
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            WikiError::InvalidPageName(name) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid page name: {}", name),
            )
                .into_response(),
            WikiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"wiki\"")],
                "Unauthorized",
            )
                .into_response(),
            WikiError::Io(e) => {
                log::error!("I/O error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("I/O error: {}", e),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_404() {
        let response = WikiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_page_name_is_400() {
        let response = WikiError::InvalidPageName("../etc".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_is_401_with_challenge() {
        let response = WikiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"wiki\""
        );
    }
}
