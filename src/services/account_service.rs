use sqlx::PgPool;

use crate::auth::policy::{AccessPolicy, SignInDenial};
use crate::auth::{self, AuthError, Claims, IdentityClaims};
use crate::config;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::User;
use crate::database::UserRepository;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Result of running the sign-in sequence for a verified identity.
#[derive(Debug)]
pub enum SignInOutcome {
    Admitted {
        user: User,
        token: String,
        expires_in: i64,
    },
    Denied(SignInDenial),
}

pub struct AccountService {
    pool: PgPool,
    policy: AccessPolicy,
}

impl AccountService {
    pub async fn new() -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::pool().await?;
        let policy = AccessPolicy::from_config(&config::config().auth);
        Ok(Self { pool, policy })
    }

    /// The sign-in sequence: blocked check on the stored account, then the
    /// allow-list gate, then the upsert that persists the recomputed role,
    /// then a session token for the admitted user.
    pub async fn sign_in(&self, identity: &IdentityClaims) -> Result<SignInOutcome, AccountError> {
        let email = identity.email.trim().to_lowercase();

        if let Some(existing) = UserRepository::find_by_email(&self.pool, &email).await? {
            if existing.is_blocked {
                tracing::info!("Sign-in refused for blocked account: {}", email);
                return Ok(SignInOutcome::Denied(SignInDenial::Blocked));
            }
        }

        if !self.policy.allows(&email) {
            tracing::info!("Sign-in refused by allow-list: {}", email);
            return Ok(SignInOutcome::Denied(SignInDenial::NotAllowed));
        }

        let role = self.policy.role_for(&email);
        let user = UserRepository::upsert_identity(
            &self.pool,
            &email,
            identity.name.as_deref(),
            identity.picture.as_deref(),
            role,
        )
        .await?;

        let claims = Claims::new(user.id, user.email.clone(), user.role);
        let token = auth::generate_session_token(&claims)?;

        tracing::info!("Signed in {} as {}", user.email, user.role.as_str());
        Ok(SignInOutcome::Admitted {
            user,
            token,
            expires_in: claims.expires_in(),
        })
    }
}
