use config::Config;
use redis::Client as RedisClient;
use repository::{
    QrCodeTokenRepository, QrCodeTokenRepositoryImpl, RefreshTokenRepository,
    RefreshTokenRepositoryImpl,
};
use services::qr_code_token::PollAuthorizedTokenService;
use sqlx::PgPool;
use std::sync::Arc;

pub mod cache;
pub mod common;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod repository;
pub mod router;
pub mod routes;
pub mod services;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub redis: Arc<RedisClient>,
    pub qr_code_tokens: Arc<dyn QrCodeTokenRepository>,
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
    pub poll_service: Arc<PollAuthorizedTokenService>,
}

impl AppState {
    pub fn new(pool: PgPool, redis: Arc<RedisClient>, config: Config) -> Self {
        let qr_code_tokens: Arc<dyn QrCodeTokenRepository> = Arc::new(
            QrCodeTokenRepositoryImpl::new(pool.clone(), redis.clone(), config.qr_token_ttl()),
        );
        let refresh_tokens: Arc<dyn RefreshTokenRepository> =
            Arc::new(RefreshTokenRepositoryImpl::new(redis.clone()));
        Self::with_repositories(pool, redis, config, qr_code_tokens, refresh_tokens)
    }

    /// 使用指定的二维码存储与刷新令牌存储构建状态
    pub fn with_repositories(
        pool: PgPool,
        redis: Arc<RedisClient>,
        config: Config,
        qr_code_tokens: Arc<dyn QrCodeTokenRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
    ) -> Self {
        let poll_service = Arc::new(PollAuthorizedTokenService::new(
            qr_code_tokens.clone(),
            config.qr_poll_timeout(),
        ));
        Self {
            pool,
            config,
            redis,
            qr_code_tokens,
            refresh_tokens,
            poll_service,
        }
    }
}
