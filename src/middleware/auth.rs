use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::{
    AppState,
    error::AppError,
    utils::{TokenKind, verify_token},
};

/// 校验 Bearer 访问令牌，并把 Claims 放入请求扩展供处理器读取
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let claims = verify_token(token, &state.config).map_err(|e| {
        tracing::debug!("Rejected access token: {}", e);
        AppError::Unauthorized
    })?;

    // 刷新令牌不能用于访问受保护资源
    if claims.kind != TokenKind::Access {
        return Err(AppError::Unauthorized);
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
