/// 限流计数器缓存键前缀
const RATE_LIMIT_PREFIX: &str = "rate_limit:";

/// 生成按客户端IP计数的限流键
pub fn rate_limit_key(ip: &str) -> String {
    format!("{}{}", RATE_LIMIT_PREFIX, ip)
}
