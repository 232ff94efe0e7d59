//! Credential verification and role gating.
//!
//! Tokens arrive as `Authorization: Bearer <token>` or a `token` cookie.
//! Each protected route group composes one of the role-specific entry
//! points over the shared [`authorize`] stage. A rejected request never
//! reaches the handler, so no database or provider call happens.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::models::Role;
use crate::services::AccessTokenClaims;
use crate::AppState;
use service_core::error::AppError;

const TOKEN_COOKIE: &str = "token";

pub async fn student_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, req, next, &[Role::Student]).await
}

pub async fn doctor_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, req, next, &[Role::Doctor]).await
}

/// Verify the request's credential and check its role against `allowed`.
/// On success the claims are stored in request extensions for handlers.
async fn authorize(
    state: &AppState,
    mut req: Request,
    next: Next,
    allowed: &[Role],
) -> Result<Response, AppError> {
    let token = extract_token(&req)
        .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("Missing authentication token")))?;

    let claims = state.jwt.validate_token(&token)?;

    if !allowed.contains(&claims.role) {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Access denied for role '{}'",
            claims.role
        )));
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Bearer header takes precedence; the cookie is the browser fallback.
fn extract_token(req: &Request) -> Option<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned);

    bearer.or_else(|| {
        CookieJar::from_headers(req.headers())
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
    })
}

/// Extractor exposing the verified claims to handlers.
pub struct AuthUser(pub AccessTokenClaims);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts.extensions.get::<AccessTokenClaims>().cloned().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("Auth claims missing from request extensions"))
        })?;

        Ok(AuthUser(claims))
    }
}
