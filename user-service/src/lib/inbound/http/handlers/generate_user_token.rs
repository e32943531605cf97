use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::GenerateUserTokenCommand;
use crate::domain::user::models::Token;
use crate::inbound::http::router::AppState;

pub async fn generate_user_token(
    State(state): State<AppState>,
    Json(body): Json<GenerateUserTokenRequest>,
) -> Result<ApiSuccess<GenerateUserTokenResponseData>, ApiError> {
    state
        .user_service
        .generate_user_token(body.into())
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateUserTokenRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

impl From<GenerateUserTokenRequest> for GenerateUserTokenCommand {
    fn from(request: GenerateUserTokenRequest) -> Self {
        Self {
            username: request.username,
            password: request.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateUserTokenResponseData {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub expires_in: i64,
}

impl From<Token> for GenerateUserTokenResponseData {
    fn from(token: Token) -> Self {
        Self {
            token: token.value,
            token_type: token.token_type,
            expires_in: token.expires_in,
        }
    }
}
