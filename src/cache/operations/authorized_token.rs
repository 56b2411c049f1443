use crate::cache::keys::authorized_token_key;
use crate::cache::models::authorized_token::AuthorizedQrCodeToken;
use crate::error::AppError;
use redis::{AsyncCommands, Client as RedisClient};
use std::sync::Arc;
use std::time::Duration;

/// 已授权二维码令牌缓存操作
pub struct AuthorizedTokenCacheOperations;

impl AuthorizedTokenCacheOperations {
    /// 缓存已授权令牌，覆盖同一内容标识下的旧值
    pub async fn store(
        redis: &Arc<RedisClient>,
        content_id: &str,
        token: &AuthorizedQrCodeToken,
        ttl: Duration,
    ) -> Result<(), AppError> {
        let mut conn = redis.get_multiplexed_async_connection().await?;

        let json = serde_json::to_string(token)?;
        let _: () = conn
            .set_ex(authorized_token_key(content_id), json, ttl.as_secs().max(1))
            .await?;

        Ok(())
    }

    /// 获取已授权令牌
    pub async fn get(
        redis: &Arc<RedisClient>,
        content_id: &str,
    ) -> Result<Option<AuthorizedQrCodeToken>, AppError> {
        let mut conn = redis.get_multiplexed_async_connection().await?;

        let result: Option<String> = conn.get(authorized_token_key(content_id)).await?;
        decode(result)
    }

    /// 原子地取出并删除已授权令牌（GETDEL）
    pub async fn take(
        redis: &Arc<RedisClient>,
        content_id: &str,
    ) -> Result<Option<AuthorizedQrCodeToken>, AppError> {
        let mut conn = redis.get_multiplexed_async_connection().await?;

        let result: Option<String> = conn.get_del(authorized_token_key(content_id)).await?;
        decode(result)
    }

    /// 删除已授权令牌
    pub async fn clear(redis: &Arc<RedisClient>, content_id: &str) -> Result<(), AppError> {
        let mut conn = redis.get_multiplexed_async_connection().await?;

        let _: () = conn.del(authorized_token_key(content_id)).await?;

        Ok(())
    }
}

fn decode(result: Option<String>) -> Result<Option<AuthorizedQrCodeToken>, AppError> {
    match result {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
