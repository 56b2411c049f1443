// 二维码登录服务
// 生成会话、受信设备授权、以及等待授权的长轮询

pub mod poll;

pub use poll::{PollAuthorizedTokenService, PollResponse};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::cache::AuthorizedQrCodeToken;
use crate::config::Config;
use crate::database::{QrCodeToken, QrCodeTokenStatus};
use crate::error::AppError;
use crate::repository::{QrCodeTokenRepository, RefreshTokenRepository};
use crate::services::user::issue_tokens;

/// 为请求方生成新的二维码会话
pub async fn generate(
    repository: &dyn QrCodeTokenRepository,
    ip_address: &str,
    agent: &str,
) -> Result<QrCodeToken, AppError> {
    let content = content_identifier(ip_address, agent);
    let base64_content = STANDARD.encode(content.as_bytes());

    let token = repository
        .create_qr_code_token(ip_address, agent, &base64_content, &content)
        .await?;
    tracing::info!("Generated qr code token {} for {}", token.id, ip_address);
    Ok(token)
}

/// 查询会话；已过期但仍为 generated 的会话在此落为 expired
pub async fn find_by_content(
    repository: &dyn QrCodeTokenRepository,
    content: &str,
) -> Result<QrCodeToken, AppError> {
    let mut token = repository
        .get_qr_code_token_by_content(content)
        .await?
        .ok_or_else(|| AppError::NotFound("二维码不存在".to_string()))?;

    if token.status == QrCodeTokenStatus::Generated && token.is_expired_at(chrono::Utc::now()) {
        repository.expire_qr_code_token(token.id).await?;
        tracing::info!("Qr code token {} expired", token.id);
        token.status = QrCodeTokenStatus::Expired;
    }

    Ok(token)
}

/// 受信设备确认登录：消费会话、为该用户签发令牌并写入缓存等待轮询方取走
pub async fn authorize(
    repository: &dyn QrCodeTokenRepository,
    refresh_tokens: &dyn RefreshTokenRepository,
    config: &Config,
    content: &str,
    user_id: &Uuid,
) -> Result<AuthorizedQrCodeToken, AppError> {
    let token = find_by_content(repository, content).await?;

    match token.status {
        QrCodeTokenStatus::Consumed => return Err(AppError::QrCodeConsumed),
        QrCodeTokenStatus::Expired => return Err(AppError::QrCodeExpired),
        QrCodeTokenStatus::Generated => {}
    }

    // 条件更新失败说明被并发请求抢先消费
    let consumed = repository
        .consume_qr_code_token(token.id)
        .await?
        .ok_or(AppError::QrCodeConsumed)?;

    let pair = issue_tokens(refresh_tokens, config, user_id).await?;
    let authorized = AuthorizedQrCodeToken {
        raw_content: consumed.raw_content,
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    };
    repository.store_authorized_token(content, &authorized).await?;

    tracing::info!("Qr code token {} authorized by user {}", token.id, user_id);
    Ok(authorized)
}

/// 不可预测的内容标识，十六进制 sha256
fn content_identifier(ip_address: &str, agent: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(Uuid::new_v4().as_bytes());
    hasher.update(ip_address.as_bytes());
    hasher.update(agent.as_bytes());
    hasher.update(chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default().to_le_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_identifiers_are_unique_hex_digests() {
        let a = content_identifier("192.168.1.1", "Mozilla/5.0");
        let b = content_identifier("192.168.1.1", "Mozilla/5.0");

        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
