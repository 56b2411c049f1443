use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Extension, Path, Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{HeaderMapExt, UserAgent};

use crate::{
    AppState,
    common::EmptyResponse,
    error::AppError,
    services::qr_code_token::{self as qr_code_service, PollResponse, poll::TOKEN_NOT_FOUND},
    utils::{Claims, client_ip, error_codes, error_to_api_response, success_to_api_response},
};

use super::model::{AuthorizedTokenResponse, PollQuery, QrCodeTokenResponse};

pub async fn generate(
    State(state): State<AppState>,
    request: Request,
) -> Result<impl IntoResponse, AppError> {
    let remote_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string());
    let ip = client_ip(request.headers(), remote_ip.as_deref());
    let agent = request
        .headers()
        .typed_get::<UserAgent>()
        .map(|ua| ua.as_str().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let token = qr_code_service::generate(state.qr_code_tokens.as_ref(), &ip, &agent).await?;
    Ok((
        StatusCode::CREATED,
        success_to_api_response(QrCodeTokenResponse::from(token)),
    ))
}

pub async fn details(
    State(state): State<AppState>,
    Path(content): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let token = qr_code_service::find_by_content(state.qr_code_tokens.as_ref(), &content).await?;
    Ok((
        StatusCode::OK,
        success_to_api_response(QrCodeTokenResponse::from(token)),
    ))
}

/// 长轮询，最长阻塞到配置的超时时间
pub async fn poll(
    State(state): State<AppState>,
    Path(content): Path<String>,
    Query(query): Query<PollQuery>,
) -> Result<Response, AppError> {
    let interval = query
        .interval_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| state.config.qr_poll_interval());

    let response = match state.poll_service.poll(&content, interval).await? {
        PollResponse::Success(token) => (
            StatusCode::OK,
            success_to_api_response(AuthorizedTokenResponse::from(token)),
        )
            .into_response(),
        PollResponse::CloseConnection(message) => {
            let status = if message == TOKEN_NOT_FOUND {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::REQUEST_TIMEOUT
            };
            (
                status,
                error_to_api_response::<()>(error_codes::CONNECTION_CLOSED, message),
            )
                .into_response()
        }
    };

    Ok(response)
}

pub async fn authorize(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(content): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id().ok_or(AppError::Unauthorized)?;
    qr_code_service::authorize(
        state.qr_code_tokens.as_ref(),
        state.refresh_tokens.as_ref(),
        &state.config,
        &content,
        &user_id,
    )
    .await?;

    Ok((StatusCode::OK, success_to_api_response(EmptyResponse {})))
}
