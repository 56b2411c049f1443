use crate::cache::keys::rate_limit_key;
use crate::error::AppError;
use redis::Client as RedisClient;
use std::sync::Arc;
use std::time::Duration;

/// 速率限制缓存操作
pub struct RateLimitCacheOperations;

impl RateLimitCacheOperations {
    /// 记录一次请求，返回窗口内的累计次数
    ///
    /// 计数器在同一个事务里以 SET NX EX 创建，过期时间与计数一起生效。
    pub async fn hit(
        redis: &Arc<RedisClient>,
        ip: &str,
        window: Duration,
    ) -> Result<i64, AppError> {
        let key = rate_limit_key(ip);
        let mut conn = redis.get_multiplexed_async_connection().await?;

        let (count,): (i64,) = redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&key)
            .arg(0)
            .arg("NX")
            .arg("EX")
            .arg(window.as_secs().max(1))
            .ignore()
            .incr(&key, 1)
            .query_async(&mut conn)
            .await?;

        Ok(count)
    }
}
