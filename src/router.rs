use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    middleware::{RateLimiter, auth_middleware, log_errors, rate_limit},
    routes,
};

// 公开路由：注册登录与二维码会话
fn public_routes(rate_limiter: Arc<RateLimiter>) -> Router<AppState> {
    let limited = Router::new()
        .route("/users/register", post(routes::user::register))
        .route("/users/login", post(routes::user::login))
        .route("/users/refresh-token", post(routes::user::refresh_token))
        .route("/qrcodes", post(routes::qr_code::generate))
        .layer(axum::middleware::from_fn_with_state(rate_limiter, rate_limit));

    // 长轮询会持续占用连接，不计入限流
    Router::new()
        .merge(limited)
        .route("/qrcodes/{content}", get(routes::qr_code::details))
        .route("/qrcodes/{content}/poll", get(routes::qr_code::poll))
}

// 需要认证的路由
fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/users/me", get(routes::user::me))
        .route(
            "/qrcodes/{content}/authorize",
            post(routes::qr_code::authorize),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let rate_limiter = Arc::new(RateLimiter::new(state.redis.clone(), state.config.clone()));

    let api = Router::new()
        .merge(public_routes(rate_limiter))
        .merge(protected_routes(&state));

    Router::new()
        .nest(&state.config.api_base_uri, api)
        .layer(axum::middleware::from_fn(log_errors))
        .with_state(state)
}
