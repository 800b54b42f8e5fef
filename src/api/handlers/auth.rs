use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{LoginRequest, RegisterRequest};
use crate::api::dtos::responses::{LoginResponse, OkResponse};
use crate::domain::models::user::{NewUser, UserProfile};
use crate::domain::services::validation::require_all;
use std::sync::Arc;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2, PasswordHash, PasswordVerifier};
use rand::rngs::OsRng;
use tracing::{info, warn};

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let [name, email, _] = require_all(
        [&payload.name, &payload.email, &payload.password],
        "All fields required",
    )?;

    if state.user_repo.find_by_email(email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(raw_password(&payload.password).as_bytes(), &salt)
        .map_err(|e| AppError::InternalWithMsg(format!("Password hashing failed: {}", e)))?
        .to_string();

    let user = NewUser::new(name.to_string(), email.to_string(), password_hash);
    let created = state.user_repo.create(&user).await.map_err(|e| {
        // Lost a race with a concurrent registration for the same address.
        if e.is_unique_violation() {
            AppError::Conflict("Email already exists".into())
        } else {
            e
        }
    })?;

    info!("Registered user: {}", created.id);
    Ok(Json(OkResponse::ok()))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let [email, _] = require_all(
        [&payload.email, &payload.password],
        "Email and password required",
    )?;

    let invalid = || AppError::Unauthorized("Invalid credentials".into());

    let user = state.user_repo.find_by_email(email).await?
        .ok_or_else(invalid)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::InternalWithMsg(format!("Stored password hash is unreadable: {}", e)))?;

    if Argon2::default().verify_password(raw_password(&payload.password).as_bytes(), &parsed_hash).is_err() {
        warn!("Rejected login for user: {}", user.id);
        return Err(invalid());
    }

    info!("User logged in: {}", user.id);

    Ok(Json(LoginResponse {
        ok: true,
        user: UserProfile::from(user),
    }))
}

/// Passwords are hashed and verified exactly as sent; trimming only
/// applies to the presence check.
fn raw_password(password: &Option<String>) -> &str {
    password.as_deref().unwrap_or_default()
}
