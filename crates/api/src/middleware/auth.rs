//! Bearer-token authentication gates for Axum handlers.
//!
//! A token is accepted only when its signature and expiry verify AND an
//! active session exists for it. Both gates run the same checks; they differ
//! only in what a failure turns into.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use numisroma_core::error::CoreError;
use numisroma_core::types::DbId;

use crate::auth::sessions;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, resolved from `Authorization: Bearer <token>`.
///
/// Use as an extractor on any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// The session the presented token belongs to.
    pub session_id: DbId,
    /// The raw bearer token, needed to tell the current session apart.
    pub token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, state).await
    }
}

/// Optional authentication: `Some` for a valid session, `None` otherwise.
///
/// Never rejects. Handlers use it to personalise public responses.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    pub fn user_id(&self) -> Option<DbId> {
        self.0.as_ref().map(|u| u.user_id)
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(&parts.headers, state).await {
            Ok(user) => Ok(MaybeAuthUser(Some(user))),
            Err(error) => {
                if parts.headers.contains_key(AUTHORIZATION) {
                    tracing::debug!(%error, "Ignoring invalid credentials on optional route");
                }
                Ok(MaybeAuthUser(None))
            }
        }
    }
}

async fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<AuthUser, AppError> {
    let token = bearer_token(headers)?;

    let claims = state
        .tokens
        .verify(token)
        .map_err(|_| CoreError::Unauthenticated("Invalid token".into()))?;

    let session = sessions::find_active_by_token(&state.pool, token)
        .await?
        .ok_or(CoreError::SessionTerminated)?;

    // The session row is authoritative; a token whose claims disagree with
    // its own session is treated as forged.
    if session.user_id != claims.user_id {
        return Err(CoreError::Unauthenticated("Invalid token".into()).into());
    }

    sessions::touch_activity(&state.pool, &session).await;

    Ok(AuthUser {
        user_id: session.user_id,
        session_id: session.id,
        token: token.to_string(),
    })
}

/// The second space-delimited segment of the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, CoreError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| CoreError::Unauthenticated("No token provided".into()))?;

    header
        .to_str()
        .ok()
        .and_then(|value| value.split(' ').nth(1))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| CoreError::Unauthenticated("Malformed token".into()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    use super::*;

    fn with_auth(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn missing_header_reports_no_token() {
        assert_matches!(
            bearer_token(&HeaderMap::new()),
            Err(CoreError::Unauthenticated(msg)) if msg == "No token provided"
        );
    }

    #[test]
    fn header_without_second_segment_is_malformed() {
        assert_matches!(
            bearer_token(&with_auth("Bearer")),
            Err(CoreError::Unauthenticated(msg)) if msg == "Malformed token"
        );
        assert_matches!(
            bearer_token(&with_auth("Bearer ")),
            Err(CoreError::Unauthenticated(msg)) if msg == "Malformed token"
        );
    }

    #[test]
    fn second_segment_is_the_token() {
        assert_eq!(bearer_token(&with_auth("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }
}
