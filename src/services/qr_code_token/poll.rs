use std::sync::Arc;
use std::time::Duration;

use crate::cache::AuthorizedQrCodeToken;
use crate::error::AppError;
use crate::repository::QrCodeTokenRepository;

pub const TOKEN_NOT_FOUND: &str = "Token not found";
pub const CONNECTION_TIMED_OUT: &str = "Connection timed out";

/// 默认的长轮询上限
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(60);

/// 轮询结果：要么关闭连接并给出原因，要么带回已授权令牌
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResponse {
    CloseConnection(String),
    Success(AuthorizedQrCodeToken),
}

/// 等待受信设备授权二维码登录
///
/// 每次 `poll` 同时运行两个活动：超时计时与令牌轮询，先完成者决定结果，
/// 另一个在当前等待点被丢弃，之后不会再访问存储。调用方丢弃 `poll`
/// 时两个活动一并丢弃。两者在同一时刻就绪时由运行时调度决定胜负，
/// 这个窄窗口内的结果不保证确定。
pub struct PollAuthorizedTokenService {
    repository: Arc<dyn QrCodeTokenRepository>,
    timeout: Duration,
}

impl PollAuthorizedTokenService {
    pub fn new(repository: Arc<dyn QrCodeTokenRepository>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }

    pub async fn poll(
        &self,
        content_id: &str,
        interval: Duration,
    ) -> Result<PollResponse, AppError> {
        if interval.is_zero() {
            return Err(AppError::Validation("轮询间隔必须大于0".to_string()));
        }

        if self
            .repository
            .get_qr_code_token_by_content(content_id)
            .await?
            .is_none()
        {
            return Ok(PollResponse::CloseConnection(TOKEN_NOT_FOUND.to_string()));
        }

        tokio::select! {
            response = self.time_out() => Ok(response),
            token = self.poll_token(content_id, interval) => Ok(PollResponse::Success(token?)),
        }
    }

    async fn time_out(&self) -> PollResponse {
        tokio::time::sleep(self.timeout).await;
        tracing::debug!(
            target: "invoicer::poll_authorized_token",
            "Authorized qr token timed out after {:?}, aborting connection",
            self.timeout
        );
        PollResponse::CloseConnection(CONNECTION_TIMED_OUT.to_string())
    }

    /// 循环取令牌直到取到为止
    async fn poll_token(
        &self,
        content_id: &str,
        interval: Duration,
    ) -> Result<AuthorizedQrCodeToken, AppError> {
        loop {
            if let Some(token) = self.repository.take_authorized_token(content_id).await? {
                tracing::debug!(
                    target: "invoicer::poll_authorized_token",
                    "Authorized qr token found for {}, removed from cache",
                    content_id
                );
                return Ok(token);
            }

            tracing::debug!(
                target: "invoicer::poll_authorized_token",
                "Authorized qr token not found for {}, waiting {:?} before another poll",
                content_id,
                interval
            );

            tokio::time::sleep(interval).await;
        }
    }
}
