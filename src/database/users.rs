use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{User, UserRole};

pub struct UserRepository;

impl UserRepository {
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM \"users\" WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Insert-or-update keyed by email. Name and image only refresh when
    /// the identity provider sent them; the role is overwritten on every
    /// sign-in so allow-list changes take effect at the next login.
    pub async fn upsert_identity(
        pool: &PgPool,
        email: &str,
        name: Option<&str>,
        image: Option<&str>,
        role: UserRole,
    ) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO \"users\" (id, email, name, image, role, is_blocked, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, false, now(), now()) \
             ON CONFLICT (email) DO UPDATE SET \
                 name = COALESCE(EXCLUDED.name, \"users\".name), \
                 image = COALESCE(EXCLUDED.image, \"users\".image), \
                 role = EXCLUDED.role, \
                 updated_at = now() \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(name)
        .bind(image)
        .bind(role)
        .fetch_one(pool)
        .await?;
        Ok(user)
    }
}
