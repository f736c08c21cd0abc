//! Handlers for the `/auth` resource: registration, login, logout, and the
//! account lifecycle of the signed-in user.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use numisroma_core::error::CoreError;
use numisroma_core::types::DbId;
use numisroma_core::validation::{
    is_email_identifier, normalize_email, validate_avatar, validate_bio, validate_password,
    validate_username,
};
use numisroma_db::models::user::{CreateUser, UpdateProfile, User, UserResponse};
use numisroma_db::repositories::{CollectionRepo, FollowRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{hash_password, verify_dummy_password, verify_password};
use crate::auth::sessions;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::client::ClientContext;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub username: String,
    #[validate(
        email(message = "Invalid email address"),
        length(max = 254, message = "Email must be at most 254 characters")
    )]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
///
/// `identifier` is an email when it contains `@`, otherwise a username.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "email", alias = "username")]
    pub identifier: String,
    pub password: String,
    /// Optional human-readable location reported by the client.
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeUsernameRequest {
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    pub password: String,
}

/// Returned by register and login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account and sign it in on the registering device.
pub async fn register(
    State(state): State<AppState>,
    client: ClientContext,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    input.validate()?;
    validate_username(&input.username)?;
    validate_password(&input.password)?;

    let email = normalize_email(&input.email);
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(CoreError::AlreadyRegistered.into());
    }
    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict("Username is already taken".into()).into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))?;

    // A concurrent registration can pass the checks above; the unique
    // constraints decide the winner.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email,
            password_hash,
        },
    )
    .await
    .map_err(registration_conflict)?;

    let token = start_session(&state, user.id, &client).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// POST /api/auth/login
///
/// Unknown identifiers and wrong passwords fail identically.
pub async fn login(
    State(state): State<AppState>,
    client: ClientContext,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let identifier = input.identifier.trim();
    let user = if is_email_identifier(identifier) {
        UserRepo::find_by_email(&state.pool, &normalize_email(identifier)).await?
    } else {
        UserRepo::find_by_username(&state.pool, identifier).await?
    };

    let Some(user) = user else {
        verify_dummy_password(&input.password);
        tracing::info!("Login failed: unknown identifier");
        return Err(CoreError::InvalidCredentials.into());
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login failed: wrong password");
        return Err(CoreError::InvalidCredentials.into());
    }

    let client = client.with_location(input.location.as_deref());
    let token = start_session(&state, user.id, &client).await?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(TokenResponse { token }))
}

/// POST /api/auth/logout
///
/// Revoke the session of the presented token. Other devices stay signed in.
pub async fn logout(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    sessions::deactivate(&state.pool, &auth_user.token).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// GET /api/auth/me
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = load_user(&state, auth_user.user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/auth/change-password
pub async fn change_password(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = load_user(&state, auth_user.user_id).await?;
    ensure_password(&input.current_password, &user)?;
    validate_password(&input.new_password)?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    tracing::info!(user_id = user.id, "Password changed");

    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// POST /api/auth/change-username
pub async fn change_username(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ChangeUsernameRequest>,
) -> AppResult<Json<UserResponse>> {
    validate_username(&input.username)?;

    if let Some(existing) = UserRepo::find_by_username(&state.pool, &input.username).await? {
        if existing.id != auth_user.user_id {
            return Err(CoreError::Conflict("Username is already taken".into()).into());
        }
    }

    let user = UserRepo::update_username(&state.pool, auth_user.user_id, &input.username)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        })?;

    tracing::info!(user_id = user.id, username = %user.username, "Username changed");

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/auth/profile
///
/// Absent fields are left unchanged.
pub async fn update_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    if let Some(bio) = &input.bio {
        validate_bio(bio)?;
    }
    if let Some(avatar) = &input.avatar_url {
        validate_avatar(avatar)?;
    }

    let update = UpdateProfile {
        avatar_url: input.avatar_url,
        bio: input.bio,
    };
    let user = UserRepo::update_profile(&state.pool, auth_user.user_id, &update)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        })?;

    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/auth/delete-account
///
/// Removes the caller's collections, then follow edges on either side, then
/// revokes every session, then deletes the user row. The steps are not
/// wrapped in a transaction; a failure part-way surfaces as a 500.
pub async fn delete_account(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<DeleteAccountRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = load_user(&state, auth_user.user_id).await?;
    ensure_password(&input.password, &user)?;

    let collections = CollectionRepo::delete_all_for_user(&state.pool, user.id).await?;
    let follows = FollowRepo::delete_all_for_user(&state.pool, user.id).await?;
    let sessions = SessionRepo::deactivate_all_for_user(&state.pool, user.id).await?;
    UserRepo::delete(&state.pool, user.id).await?;

    tracing::info!(
        user_id = user.id,
        collections,
        follows,
        sessions,
        "Account deleted",
    );

    Ok(Json(MessageResponse::new("Account deleted successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a token and record it as a new session for `user_id`.
async fn start_session(state: &AppState, user_id: DbId, client: &ClientContext) -> AppResult<String> {
    let token = state
        .tokens
        .issue(user_id)
        .map_err(|e| CoreError::Internal(format!("Token generation error: {e}")))?;

    sessions::create_session(&state.pool, user_id, &token, client).await?;

    Ok(token)
}

/// Map a unique violation on the users table to the domain error the
/// up-front checks would have produced.
fn registration_conflict(err: sqlx::Error) -> AppError {
    let constraint = err
        .as_database_error()
        .filter(|db_err| db_err.is_unique_violation())
        .and_then(|db_err| db_err.constraint());
    let conflict = match constraint {
        Some("uq_users_email") => Some(CoreError::AlreadyRegistered),
        Some("uq_users_username") => Some(CoreError::Conflict("Username is already taken".into())),
        _ => None,
    };
    match conflict {
        Some(core) => AppError::Core(core),
        None => AppError::Database(err),
    }
}

async fn load_user(state: &AppState, user_id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))
}

/// Re-authentication for an already signed-in caller.
fn ensure_password(password: &str, user: &User) -> AppResult<()> {
    let valid = verify_password(password, &user.password_hash)
        .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))?;
    if !valid {
        return Err(CoreError::IncorrectPassword.into());
    }
    Ok(())
}
