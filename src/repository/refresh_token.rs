use async_trait::async_trait;
use redis::Client as RedisClient;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::cache::RefreshTokenCacheOperations;
use crate::error::AppError;

/// 已签发刷新令牌的登记簿
///
/// 只有登记过且尚未使用的刷新令牌才能换取新令牌。
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn store_refresh_token(
        &self,
        user_id: &Uuid,
        token: &str,
        ttl: Duration,
    ) -> Result<(), AppError>;

    /// 原子地移除令牌，令牌存在时返回 true
    async fn consume_refresh_token(&self, user_id: &Uuid, token: &str) -> Result<bool, AppError>;
}

pub struct RefreshTokenRepositoryImpl {
    redis: Arc<RedisClient>,
}

impl RefreshTokenRepositoryImpl {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl RefreshTokenRepository for RefreshTokenRepositoryImpl {
    async fn store_refresh_token(
        &self,
        user_id: &Uuid,
        token: &str,
        ttl: Duration,
    ) -> Result<(), AppError> {
        RefreshTokenCacheOperations::store(&self.redis, user_id, token, ttl).await
    }

    async fn consume_refresh_token(&self, user_id: &Uuid, token: &str) -> Result<bool, AppError> {
        RefreshTokenCacheOperations::consume(&self.redis, user_id, token).await
    }
}
