use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use hotdesk_db::Database;
use hotdesk_types::api::{AuthResponse, Claims, LoginRequest, SignupRequest};
use hotdesk_types::models::{Role, User};

use crate::convert;
use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation(
            "Name, email and password are required".into(),
        ));
    }

    // Check if the email is taken
    let db = state.clone();
    let email = req.email.clone();
    if tokio::task::spawn_blocking(move || db.db.get_user_by_email(&email))
        .await??
        .is_some()
    {
        return Err(ApiError::Validation("Registration failed".into()));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?
        .to_string();

    let user_id = Uuid::new_v4();

    let db = state.clone();
    let (name, email) = (req.name.clone(), req.email.clone());
    tokio::task::spawn_blocking(move || {
        db.db.create_user(
            &user_id.to_string(),
            &name,
            &email,
            &password_hash,
            Role::User.as_str(),
        )
    })
    .await?
    // A concurrent signup can win the race past the check above; the UNIQUE
    // constraint catches it and the outcome is the same failure.
    .map_err(|_| ApiError::Validation("Registration failed".into()))?;

    let token = create_token(&state.jwt_secret, user_id, Role::User)?;

    let user = User {
        id: user_id,
        name: req.name,
        email: req.email,
        role: Role::User,
        created_at: chrono::Utc::now(),
    };

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let email = req.email.clone();
    let row = tokio::task::spawn_blocking(move || db.db.get_user_by_email(&email))
        .await??
        .ok_or(ApiError::Unauthorized("Invalid credentials"))?;

    // Verify password
    let parsed_hash = PasswordHash::new(&row.password)
        .map_err(|e| anyhow::anyhow!("stored hash unparseable: {e}"))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials"))?;

    let user = convert::user_from_row(row);
    let token = create_token(&state.jwt_secret, user.id, user.role)?;

    Ok(Json(AuthResponse { token, user }))
}

fn create_token(secret: &str, user_id: Uuid, role: Role) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user_id,
        role,
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| anyhow::anyhow!("token signing failed: {e}"))?;

    Ok(token)
}
