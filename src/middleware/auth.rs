// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication middleware.
//!
//! Access tokens are issued by the identity provider (Supabase Auth) and
//! signed with the project's HS256 secret. The first authenticated request
//! for a subject creates its profile.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Cookie carrying the access token for browser clients.
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (identity provider user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: usize,
    /// Audience
    pub aud: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Identity provider subject
    pub auth_id: String,
    /// Profile ID
    pub user_id: Uuid,
}

/// Middleware that requires valid JWT authentication.
///
/// A missing token is `Unauthorized`; a token that fails verification is
/// `InvalidToken`.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try header first, then cookie
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(h) if h.starts_with("Bearer ") => h[7..].to_string(),
        Some(_) => return Err(AppError::Unauthorized),
        None => jar
            .get(ACCESS_TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(AppError::Unauthorized)?,
    };

    let claims = verify_jwt(&token, &state.config.jwt_signing_key, &state.config.jwt_audience)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::InvalidToken
        })?;

    if claims.sub.trim().is_empty() {
        return Err(AppError::InvalidToken);
    }

    let (profile, created) = state
        .db
        .get_or_create_user(&claims.sub, claims.email.as_deref())
        .await?;

    if created {
        tracing::info!(user_id = %profile.id, "Created profile on first login");
    }

    request.extensions_mut().insert(AuthUser {
        auth_id: claims.sub,
        user_id: profile.id,
    });

    Ok(next.run(request).await)
}

/// Verify an access token and return its claims.
pub fn verify_jwt(
    token: &str,
    signing_key: &[u8],
    audience: &str,
) -> jsonwebtoken::errors::Result<Claims> {
    let key = DecodingKey::from_secret(signing_key);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[audience]);

    Ok(decode::<Claims>(token, &key, &validation)?.claims)
}

/// Create an access token the same way the identity provider does.
///
/// Used for local development and tests.
pub fn create_jwt(
    auth_id: &str,
    email: Option<&str>,
    audience: &str,
    signing_key: &[u8],
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: auth_id.to_string(),
        iat: now,
        exp: now + 60 * 60, // 1 hour
        aud: audience.to_string(),
        email: email.map(str::to_string),
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"test_jwt_key_32_bytes_minimum!!";

    #[test]
    fn test_jwt_round_trip() {
        let token = create_jwt("auth-1", Some("a@uni.edu"), "authenticated", KEY).unwrap();
        let claims = verify_jwt(&token, KEY, "authenticated").unwrap();
        assert_eq!(claims.sub, "auth-1");
        assert_eq!(claims.email.as_deref(), Some("a@uni.edu"));
    }

    #[test]
    fn test_jwt_rejects_wrong_audience() {
        let token = create_jwt("auth-1", None, "anon", KEY).unwrap();
        assert!(verify_jwt(&token, KEY, "authenticated").is_err());
    }

    #[test]
    fn test_jwt_rejects_wrong_key() {
        let token = create_jwt("auth-1", None, "authenticated", KEY).unwrap();
        assert!(verify_jwt(&token, b"another_key_entirely_32_bytes!!", "authenticated").is_err());
    }
}
