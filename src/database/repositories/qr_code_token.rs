use chrono::Utc;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use crate::database::models::qr_code_token::{QrCodeToken, QrCodeTokenRow, QrCodeTokenStatus};

const RETURNING_COLUMNS: &str =
    "id, ip_address, agent, base64_content, content, status, created_at, updated_at, expires_at";

/// 二维码会话的 Postgres 数据源
pub struct QrCodeTokenDataSource;

impl QrCodeTokenDataSource {
    /// 创建二维码会话，状态为 generated
    pub async fn create(
        pool: &PgPool,
        ip_address: &str,
        agent: &str,
        base64_content: &str,
        content: &str,
        ttl: Duration,
    ) -> Result<QrCodeToken, sqlx::Error> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::seconds(ttl.as_secs() as i64);

        let row = sqlx::query_as::<_, QrCodeTokenRow>(&format!(
            r#"
            INSERT INTO qr_code_tokens
                (id, ip_address, agent, base64_content, content, status, created_at, updated_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7, $8)
            RETURNING {RETURNING_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(ip_address)
        .bind(agent)
        .bind(base64_content)
        .bind(content)
        .bind(QrCodeTokenStatus::Generated.as_str())
        .bind(now)
        .bind(expires_at)
        .fetch_one(pool)
        .await?;

        tracing::debug!("Created qr code token {} for {}", row.id, ip_address);
        row.try_into()
    }

    /// 根据内部ID查找
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<QrCodeToken>, sqlx::Error> {
        sqlx::query_as::<_, QrCodeTokenRow>(&format!(
            "SELECT {RETURNING_COLUMNS} FROM qr_code_tokens WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(QrCodeToken::try_from)
        .transpose()
    }

    /// 根据内容标识查找
    pub async fn find_by_content(
        pool: &PgPool,
        content: &str,
    ) -> Result<Option<QrCodeToken>, sqlx::Error> {
        sqlx::query_as::<_, QrCodeTokenRow>(&format!(
            "SELECT {RETURNING_COLUMNS} FROM qr_code_tokens WHERE content = $1"
        ))
        .bind(content)
        .fetch_optional(pool)
        .await?
        .map(QrCodeToken::try_from)
        .transpose()
    }

    /// 将 generated 状态的会话迁移到目标状态，其他状态不变并返回 None
    async fn transition(
        pool: &PgPool,
        id: Uuid,
        next: QrCodeTokenStatus,
    ) -> Result<Option<QrCodeToken>, sqlx::Error> {
        sqlx::query_as::<_, QrCodeTokenRow>(&format!(
            r#"
            UPDATE qr_code_tokens
            SET status = $2, updated_at = $3
            WHERE id = $1 AND status = $4
            RETURNING {RETURNING_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(next.as_str())
        .bind(Utc::now())
        .bind(QrCodeTokenStatus::Generated.as_str())
        .fetch_optional(pool)
        .await?
        .map(QrCodeToken::try_from)
        .transpose()
    }

    pub async fn consume(pool: &PgPool, id: Uuid) -> Result<Option<QrCodeToken>, sqlx::Error> {
        Self::transition(pool, id, QrCodeTokenStatus::Consumed).await
    }

    pub async fn expire(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        if Self::transition(pool, id, QrCodeTokenStatus::Expired)
            .await?
            .is_none()
        {
            tracing::debug!("Qr code token {} was not in generated state, not expired", id);
        }
        Ok(())
    }
}
