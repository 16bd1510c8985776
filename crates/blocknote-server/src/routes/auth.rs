//! Account routes: registration and login.
//!
//! These are the only handlers that see credentials. Both return a bearer
//! token; everything else on the API consumes that token through the
//! `AuthenticatedUser` extractor.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};

use blocknote_store::NewUser;

use crate::auth;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for register and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response carrying a bearer token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /auth/register - Create an account and return a token.
///
/// # Response
///
/// - 201 Created: `{ "token": "..." }`
/// - 400 Bad Request: missing email/password, or email already registered
async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password required".to_string(),
        ));
    }

    let password_hash = auth::hash_password(&request.password)?;
    let new_user = NewUser::new(request.email.trim().to_string(), password_hash);

    // A duplicate email surfaces from the unique index as a 400.
    let user = state.store().insert_user(&new_user).await?;

    let config = state.config();
    let token = auth::create_token(user.id, &config.jwt_secret, config.jwt_expiry_hours)?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// POST /auth/login - Authenticate and return a token.
///
/// # Response
///
/// - 200 OK: `{ "token": "..." }`
/// - 401 Unauthorized: unknown email or wrong password, indistinguishably
async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state
        .store()
        .get_user_by_email(request.email.trim())
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = auth::verify_password(&request.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let config = state.config();
    let token = auth::create_token(user.id, &config.jwt_secret, config.jwt_expiry_hours)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(TokenResponse { token }))
}

/// Build account routes. Both forms, with and without the trailing slash,
/// are accepted.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/register/", post(register))
        .route("/auth/login", post(login))
        .route("/auth/login/", post(login))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_request_defaults() {
        // Missing fields deserialize to empty strings and fail validation,
        // not deserialization.
        let request: CredentialsRequest = serde_json::from_str("{}").unwrap();
        assert!(request.email.is_empty());
        assert!(request.password.is_empty());
    }

    #[test]
    fn test_token_response_serialize() {
        let response = TokenResponse {
            token: "abc.def.ghi".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"token":"abc.def.ghi"}"#);
    }
}
