use async_trait::async_trait;
use sqlx::PgPool;
use std::env;

use crate::errors::AppError;
use crate::models::user::UserRecord;

pub async fn create_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to the database")
}

/// Record-side gateway for user rows. Object safe so handlers can take it as
/// `web::Data<dyn UserStore>` and tests can swap in an in-memory fake.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(
        &self,
        name: &str,
        email: &str,
        profile_picture_url: &str,
        profile_picture_key: &str,
    ) -> Result<UserRecord, AppError>;

    /// Rows in whatever order the database returns them.
    async fn list(&self) -> Result<Vec<UserRecord>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<UserRecord>, AppError>;

    /// Fails with `NotFound` when no row matches.
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        PgUserStore { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(
        &self,
        name: &str,
        email: &str,
        profile_picture_url: &str,
        profile_picture_key: &str,
    ) -> Result<UserRecord, AppError> {
        sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (name, email, profile_picture_url, profile_picture_key) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, name, email, profile_picture_url, profile_picture_key",
        )
        .bind(name)
        .bind(email)
        .bind(profile_picture_url)
        .bind(profile_picture_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| AppError::database("Failed to create user", err))
    }

    async fn list(&self) -> Result<Vec<UserRecord>, AppError> {
        sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, profile_picture_url, profile_picture_key FROM users",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| AppError::database("Failed to fetch users", err))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserRecord>, AppError> {
        sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, profile_picture_url, profile_picture_key \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| AppError::database("Failed to fetch user", err))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| AppError::database("Failed to delete user", err))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }
}
