//! API 帮助函数

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::debug;

use crate::errors::TrackingError;

use super::types::ErrorResponse;

/// 从 TrackingError 构建错误响应（自动映射 HTTP 状态码）
pub fn error_response(err: &TrackingError) -> HttpResponse {
    HttpResponse::build(err.http_status())
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorResponse::from(err))
}

impl ResponseError for TrackingError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        error_response(self)
    }
}

/// Map JSON extractor failures onto the API error shape.
///
/// Well-formed JSON that does not fit the request schema (missing field,
/// wrong type, unknown `interaction_type`) is a validation error; anything
/// else about the payload is a bad request.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected JSON payload on {}: {}", req.path(), err);

    let tracking_err = match &err {
        JsonPayloadError::Deserialize(e) if e.is_data() => {
            TrackingError::validation(e.to_string())
        }
        JsonPayloadError::Deserialize(e) => {
            TrackingError::bad_request(format!("Malformed JSON: {}", e))
        }
        JsonPayloadError::ContentType => {
            TrackingError::bad_request("Content-Type must be application/json")
        }
        other => TrackingError::bad_request(other.to_string()),
    };

    tracking_err.into()
}
