//! Registration, login, and token refresh.

use std::sync::Arc;

use pantry_auth::jwt::decoder::JwtDecoder;
use pantry_auth::jwt::encoder::{JwtEncoder, TokenPair};
use pantry_auth::password::hasher::PasswordHasher;
use pantry_core::error::AppError;
use pantry_core::result::AppResult;
use pantry_database::repositories::user::UserRepository;
use pantry_entity::user::model::CreateUser;
use pantry_entity::user::User;

use crate::context::RequestContext;

/// Handles account creation and credential exchange.
pub struct AuthService {
    /// User repository.
    users: Arc<UserRepository>,
    /// Argon2id password hasher.
    hasher: Arc<PasswordHasher>,
    /// JWT encoder.
    encoder: Arc<JwtEncoder>,
    /// JWT decoder (for refresh).
    decoder: Arc<JwtDecoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Registers a new account and issues a token pair.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<(User, TokenPair)> {
        let password_hash = self.hasher.hash_password(password)?;

        // The unique constraint on email is the real gate; the repository
        // translates a violation into a conflict.
        let user = self
            .users
            .create(&CreateUser {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password_hash,
            })
            .await?;

        let tokens = self.encoder.generate_token_pair(user.id, &user.email)?;
        Ok((user, tokens))
    }

    /// Verifies credentials and issues a token pair.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, TokenPair)> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        let ok = self.hasher.verify_password(password, &user.password_hash)?;
        if !ok {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let tokens = self.encoder.generate_token_pair(user.id, &user.email)?;
        Ok((user, tokens))
    }

    /// Exchanges a valid refresh token for a fresh token pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(User, TokenPair)> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;

        let tokens = self.encoder.generate_token_pair(user.id, &user.email)?;
        Ok((user, tokens))
    }

    /// Returns the caller's own user record.
    pub async fn me(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
