//! JWT-backed implementation of the `AuthService` trait.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::db::Store;
use crate::services::auth_service::{AuthError, AuthService, LoginResult, UserSummary};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id.
    sub: i32,
    email: String,
    iat: i64,
    exp: i64,
}

pub struct JwtAuthService {
    store: Store,
    secret: String,
    token_ttl_hours: u64,
}

impl JwtAuthService {
    #[must_use]
    pub const fn new(store: Store, secret: String, token_ttl_hours: u64) -> Self {
        Self {
            store,
            secret,
            token_ttl_hours,
        }
    }

    fn issue_token(&self, user_id: i32, email: &str) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let ttl = chrono::Duration::hours(i64::try_from(self.token_ttl_hours).unwrap_or(24));

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }
}

#[async_trait::async_trait]
impl AuthService for JwtAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let email = email.to_lowercase();

        let user = self
            .store
            .verify_user_credentials(&email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self.issue_token(user.id, &user.email)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginResult {
            token,
            user: UserSummary {
                id: user.id,
                email: user.email,
                name: user.name,
            },
        })
    }

    async fn verify_token(&self, token: &str) -> Result<UserSummary, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AuthError::InvalidToken)?;

        // The token outliving the account must not keep granting access.
        let user = self
            .store
            .get_active_user_by_id(data.claims.sub)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Ok(UserSummary {
            id: user.id,
            email: user.email,
            name: user.name,
        })
    }
}
