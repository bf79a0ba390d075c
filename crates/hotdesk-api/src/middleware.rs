use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};

use hotdesk_types::api::Claims;

use crate::auth::AppState;
use crate::error::ApiError;

/// Authenticated caller, extracted from the `Authorization: Bearer <token>`
/// header. Token verification is stateless — the secret lives in AppState,
/// no DB lookup happens per request.
pub struct Identity(pub Claims);

impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized("Missing token"))?;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| ApiError::Unauthorized("Invalid token"))?;

        Ok(Identity(token_data.claims))
    }
}
