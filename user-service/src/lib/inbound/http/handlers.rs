use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::ErrorKind;
use crate::user::errors::UserError;

pub mod create_user;
pub mod generate_user_token;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(Vec<ApiErrorItem>),
    Unauthorized(ApiErrorItem),
    NotFound(String),
    Conflict(String),
    GatewayTimeout(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, messages) = match self {
            ApiError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalServerError",
                vec![ApiErrorItem::new("UnexpectedError", msg)],
            ),
            ApiError::BadRequest(items) => (StatusCode::BAD_REQUEST, "ValidationError", items),
            ApiError::Unauthorized(item) => {
                (StatusCode::UNAUTHORIZED, "AuthenticationError", vec![item])
            }
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "RecordNotFound",
                vec![ApiErrorItem::new("data", msg)],
            ),
            ApiError::Conflict(msg) => (
                StatusCode::CONFLICT,
                "DuplicateResource",
                vec![ApiErrorItem::new("resource", msg)],
            ),
            ApiError::GatewayTimeout(msg) => (
                StatusCode::GATEWAY_TIMEOUT,
                "RequestTimeout",
                vec![ApiErrorItem::new("request", msg)],
            ),
        };

        (
            status,
            Json(ApiResponseBody::new_error(status, error_type, messages)),
        )
            .into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match (err.kind(), err) {
            (_, UserError::Validation(validation)) => ApiError::BadRequest(
                validation
                    .fields()
                    .iter()
                    .flat_map(|field| {
                        field
                            .reasons
                            .iter()
                            .map(|reason| ApiErrorItem::new(field.field.as_str(), reason.as_str()))
                    })
                    .collect(),
            ),
            (_, UserError::Authentication) => ApiError::Unauthorized(ApiErrorItem::new(
                "authentication",
                "wrong username/password",
            )),
            (ErrorKind::NotFound, e) => ApiError::NotFound(e.to_string()),
            (ErrorKind::Conflict, _) => {
                ApiError::Conflict("duplicate violation on unique constraint".to_string())
            }
            (_, UserError::Cancelled(msg)) => ApiError::GatewayTimeout(msg),
            (_, e) => {
                tracing::error!(error = %e, "Unexpected error");
                ApiError::InternalServerError(e.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(
        status_code: StatusCode,
        error_type: &str,
        messages: Vec<ApiErrorItem>,
    ) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData {
                error_type: error_type.to_string(),
                messages,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    #[serde(rename = "type")]
    pub error_type: String,
    pub messages: Vec<ApiErrorItem>,
}

/// One failed rule, or one error description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorItem {
    pub name: String,
    pub reason: String,
}

impl ApiErrorItem {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
