use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::user::UserEntity;

/// 用户存储库实现
pub struct UserRepository;

impl UserRepository {
    /// 创建用户，密码需已哈希
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .await;

        match result {
            Ok(user) => {
                tracing::info!("Created user: {}", user.id);
                Ok(user)
            }
            Err(e) => {
                tracing::error!("Failed to create user: {:?}", e);
                Err(e)
            }
        }
    }

    /// 根据ID查找用户
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            "SELECT id, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// 根据邮箱查找用户
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }
}
