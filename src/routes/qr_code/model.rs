use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache::AuthorizedQrCodeToken;
use crate::database::{QrCodeToken, QrCodeTokenStatus};

#[derive(Debug, Serialize)]
pub struct QrCodeTokenResponse {
    pub id: Uuid,
    pub content: String,
    pub base64_content: String,
    pub status: QrCodeTokenStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<QrCodeToken> for QrCodeTokenResponse {
    fn from(token: QrCodeToken) -> Self {
        Self {
            id: token.id,
            content: token.raw_content,
            base64_content: token.base64_content,
            status: token.status,
            created_at: token.created_at,
            expires_at: token.expires_at,
        }
    }
}

/// 长轮询参数，未指定间隔时使用配置值
#[derive(Debug, Default, Deserialize)]
pub struct PollQuery {
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct AuthorizedTokenResponse {
    pub raw_content: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<AuthorizedQrCodeToken> for AuthorizedTokenResponse {
    fn from(token: AuthorizedQrCodeToken) -> Self {
        Self {
            raw_content: token.raw_content,
            access_token: token.access_token,
            refresh_token: token.refresh_token,
        }
    }
}
