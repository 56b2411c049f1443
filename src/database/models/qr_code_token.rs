use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// 二维码登录会话状态
///
/// 只允许 `Generated -> Consumed` 或 `Generated -> Expired`，不可回退。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QrCodeTokenStatus {
    Generated,
    Consumed,
    Expired,
}

impl QrCodeTokenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QrCodeTokenStatus::Generated => "generated",
            QrCodeTokenStatus::Consumed => "consumed",
            QrCodeTokenStatus::Expired => "expired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "generated" => Some(QrCodeTokenStatus::Generated),
            "consumed" => Some(QrCodeTokenStatus::Consumed),
            "expired" => Some(QrCodeTokenStatus::Expired),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: QrCodeTokenStatus) -> bool {
        matches!(
            (self, next),
            (QrCodeTokenStatus::Generated, QrCodeTokenStatus::Consumed)
                | (QrCodeTokenStatus::Generated, QrCodeTokenStatus::Expired)
        )
    }
}

/// 二维码登录会话
#[derive(Debug, Clone, Serialize)]
pub struct QrCodeToken {
    pub id: Uuid,
    pub ip_address: String,
    pub agent: String,
    pub base64_content: String,
    pub raw_content: String,
    pub status: QrCodeTokenStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl QrCodeToken {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status == QrCodeTokenStatus::Expired || now >= self.expires_at
    }
}

/// `qr_code_tokens` 表的行结构，状态以文本存储
#[derive(Debug, FromRow)]
pub struct QrCodeTokenRow {
    pub id: Uuid,
    pub ip_address: String,
    pub agent: String,
    pub base64_content: String,
    pub content: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TryFrom<QrCodeTokenRow> for QrCodeToken {
    type Error = sqlx::Error;

    fn try_from(row: QrCodeTokenRow) -> Result<Self, Self::Error> {
        let status = QrCodeTokenStatus::parse(&row.status).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown qr code token status: {}", row.status).into())
        })?;

        Ok(QrCodeToken {
            id: row.id,
            ip_address: row.ip_address,
            agent: row.agent,
            base64_content: row.base64_content,
            raw_content: row.content,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            expires_at: row.expires_at,
        })
    }
}
