use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    error::AppError,
    services::user as user_service,
    utils::{Claims, success_to_api_response},
};

use super::model::{
    LoginRequest, LoginResponse, RefreshTokenRequest, RegisterRequest, RegisterResponse,
    UserResponse,
};

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.email.trim() != req.confirm_email.trim() {
        return Err(AppError::Validation("两次输入的邮箱不一致".to_string()));
    }

    let user = user_service::register(&state.pool, &req.email, &req.password).await?;
    Ok((
        StatusCode::CREATED,
        success_to_api_response(RegisterResponse { user_id: user.id }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (user, tokens) = user_service::login(
        &state.pool,
        state.refresh_tokens.as_ref(),
        &state.config,
        &req.email,
        &req.password,
    )
    .await?;

    Ok((
        StatusCode::OK,
        success_to_api_response(LoginResponse {
            user_id: user.id,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }),
    ))
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tokens =
        user_service::refresh(state.refresh_tokens.as_ref(), &state.config, &req.refresh_token)
            .await?;
    Ok((StatusCode::OK, success_to_api_response(tokens)))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id().ok_or(AppError::Unauthorized)?;
    let user = user_service::find_by_id(&state.pool, user_id).await?;
    Ok((StatusCode::OK, success_to_api_response(UserResponse::from(user))))
}
