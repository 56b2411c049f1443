/// 已授权二维码令牌缓存键前缀
const AUTHORIZED_TOKEN_PREFIX: &str = "qrcode:authorized:";

/// 生成已授权二维码令牌缓存键
pub fn authorized_token_key(content_id: &str) -> String {
    format!("{}{}", AUTHORIZED_TOKEN_PREFIX, content_id)
}
