// API error taxonomy
// Every handler failure maps to one status code and a `detail` message

use std::fmt;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::response::error_response;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Page, user or resource absent from the dataset
    NotFound(&'static str),
    /// Required body fields missing or empty
    BadRequest(String),
    /// Parameter or body failed type validation
    Unprocessable(String),
    MethodNotAllowed { allow: &'static str },
    PayloadTooLarge,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Self::NotFound(message) => *message,
            Self::BadRequest(message) | Self::Unprocessable(message) => message.as_str(),
            Self::MethodNotAllowed { .. } => "Method Not Allowed",
            Self::PayloadTooLarge => "Request body too large",
        }
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        let mut response = error_response(self.status(), self.detail());
        if let Self::MethodNotAllowed { allow } = self {
            response
                .headers_mut()
                .insert("Allow", hyper::header::HeaderValue::from_static(allow));
        }
        response
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status().as_u16(), self.detail())
    }
}

impl std::error::Error for ApiError {}
