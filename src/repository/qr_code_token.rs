use async_trait::async_trait;
use redis::Client as RedisClient;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::cache::{AuthorizedQrCodeToken, AuthorizedTokenCacheOperations};
use crate::database::{QrCodeToken, QrCodeTokenDataSource};
use crate::error::AppError;

/// 二维码会话与已授权令牌的存储契约
///
/// 会话记录和已授权令牌都以内容标识关联。实现必须可在多个并发轮询方
/// 与授权写入方之间共享。
#[async_trait]
pub trait QrCodeTokenRepository: Send + Sync {
    async fn create_qr_code_token(
        &self,
        ip_address: &str,
        agent: &str,
        base64_content: &str,
        content: &str,
    ) -> Result<QrCodeToken, AppError>;

    async fn get_qr_code_token_by_id(&self, id: Uuid) -> Result<Option<QrCodeToken>, AppError>;

    async fn get_qr_code_token_by_content(
        &self,
        content: &str,
    ) -> Result<Option<QrCodeToken>, AppError>;

    /// 仅当会话仍为 generated 时生效，否则返回 None
    async fn consume_qr_code_token(&self, id: Uuid) -> Result<Option<QrCodeToken>, AppError>;

    async fn expire_qr_code_token(&self, id: Uuid) -> Result<(), AppError>;

    async fn store_authorized_token(
        &self,
        content: &str,
        token: &AuthorizedQrCodeToken,
    ) -> Result<(), AppError>;

    async fn get_authorized_token(
        &self,
        content: &str,
    ) -> Result<Option<AuthorizedQrCodeToken>, AppError>;

    async fn clear_authorized_token(&self, content: &str) -> Result<(), AppError>;

    /// 取出并删除已授权令牌
    ///
    /// 默认实现先读后删，两个并发调用方可能都读到同一个令牌。
    /// 后端支持原子取出时应覆盖此方法。
    async fn take_authorized_token(
        &self,
        content: &str,
    ) -> Result<Option<AuthorizedQrCodeToken>, AppError> {
        let token = self.get_authorized_token(content).await?;
        if token.is_some() {
            self.clear_authorized_token(content).await?;
        }
        Ok(token)
    }
}

/// 会话存 Postgres，已授权令牌存 Redis
pub struct QrCodeTokenRepositoryImpl {
    pool: PgPool,
    redis: Arc<RedisClient>,
    ttl: Duration,
}

impl QrCodeTokenRepositoryImpl {
    pub fn new(pool: PgPool, redis: Arc<RedisClient>, ttl: Duration) -> Self {
        Self { pool, redis, ttl }
    }
}

#[async_trait]
impl QrCodeTokenRepository for QrCodeTokenRepositoryImpl {
    async fn create_qr_code_token(
        &self,
        ip_address: &str,
        agent: &str,
        base64_content: &str,
        content: &str,
    ) -> Result<QrCodeToken, AppError> {
        Ok(QrCodeTokenDataSource::create(
            &self.pool,
            ip_address,
            agent,
            base64_content,
            content,
            self.ttl,
        )
        .await?)
    }

    async fn get_qr_code_token_by_id(&self, id: Uuid) -> Result<Option<QrCodeToken>, AppError> {
        Ok(QrCodeTokenDataSource::find_by_id(&self.pool, id).await?)
    }

    async fn get_qr_code_token_by_content(
        &self,
        content: &str,
    ) -> Result<Option<QrCodeToken>, AppError> {
        Ok(QrCodeTokenDataSource::find_by_content(&self.pool, content).await?)
    }

    async fn consume_qr_code_token(&self, id: Uuid) -> Result<Option<QrCodeToken>, AppError> {
        Ok(QrCodeTokenDataSource::consume(&self.pool, id).await?)
    }

    async fn expire_qr_code_token(&self, id: Uuid) -> Result<(), AppError> {
        Ok(QrCodeTokenDataSource::expire(&self.pool, id).await?)
    }

    async fn store_authorized_token(
        &self,
        content: &str,
        token: &AuthorizedQrCodeToken,
    ) -> Result<(), AppError> {
        AuthorizedTokenCacheOperations::store(&self.redis, content, token, self.ttl).await
    }

    async fn get_authorized_token(
        &self,
        content: &str,
    ) -> Result<Option<AuthorizedQrCodeToken>, AppError> {
        AuthorizedTokenCacheOperations::get(&self.redis, content).await
    }

    async fn clear_authorized_token(&self, content: &str) -> Result<(), AppError> {
        AuthorizedTokenCacheOperations::clear(&self.redis, content).await
    }

    async fn take_authorized_token(
        &self,
        content: &str,
    ) -> Result<Option<AuthorizedQrCodeToken>, AppError> {
        AuthorizedTokenCacheOperations::take(&self.redis, content).await
    }
}
