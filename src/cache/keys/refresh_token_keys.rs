use sha2::{Digest, Sha256};
use uuid::Uuid;

/// 刷新令牌缓存键前缀
const REFRESH_TOKEN_PREFIX: &str = "refresh_token:";

/// 生成刷新令牌缓存键，令牌本身只以 sha256 摘要出现在键中
pub fn refresh_token_key(user_id: &Uuid, token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{}{}:{:x}", REFRESH_TOKEN_PREFIX, user_id, digest)
}
