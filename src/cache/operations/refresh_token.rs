use crate::cache::keys::refresh_token_key;
use crate::error::AppError;
use redis::{AsyncCommands, Client as RedisClient};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// 刷新令牌缓存操作
pub struct RefreshTokenCacheOperations;

impl RefreshTokenCacheOperations {
    /// 登记签发的刷新令牌，过期时间与令牌一致
    pub async fn store(
        redis: &Arc<RedisClient>,
        user_id: &Uuid,
        token: &str,
        ttl: Duration,
    ) -> Result<(), AppError> {
        let mut conn = redis.get_multiplexed_async_connection().await?;

        let _: () = conn
            .set_ex(
                refresh_token_key(user_id, token),
                chrono::Utc::now().timestamp(),
                ttl.as_secs().max(1),
            )
            .await?;

        Ok(())
    }

    /// 删除刷新令牌，返回删除前是否存在
    ///
    /// DEL 是原子的，同一令牌并发使用时只有一个调用方得到 true。
    pub async fn consume(
        redis: &Arc<RedisClient>,
        user_id: &Uuid,
        token: &str,
    ) -> Result<bool, AppError> {
        let mut conn = redis.get_multiplexed_async_connection().await?;

        let removed: i64 = conn.del(refresh_token_key(user_id, token)).await?;

        Ok(removed == 1)
    }
}
