use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::utils::{error_codes, error_to_api_response};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("未授权访问")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("二维码已过期")]
    QrCodeExpired,

    #[error("二维码已被使用")]
    QrCodeConsumed,

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("缓存错误: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("令牌错误: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("密码处理错误: {0}")]
    Password(#[from] bcrypt::BcryptError),
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, i32) {
        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, error_codes::AUTH_FAILED),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
            AppError::Conflict(_) => (StatusCode::CONFLICT, error_codes::USER_EXISTS),
            AppError::QrCodeExpired | AppError::QrCodeConsumed => {
                (StatusCode::GONE, error_codes::QR_CODE_UNAVAILABLE)
            }
            AppError::Database(_)
            | AppError::Cache(_)
            | AppError::Serialization(_)
            | AppError::Token(_)
            | AppError::Password(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // 基础设施错误不向客户端暴露细节
        let msg = if status.is_server_error() {
            tracing::error!("Internal error: {}", self);
            "内部服务器错误".to_string()
        } else {
            self.to_string()
        };

        (status, error_to_api_response::<()>(code, msg)).into_response()
    }
}
