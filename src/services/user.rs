use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::database::{UserEntity, UserRepository};
use crate::error::AppError;
use crate::repository::RefreshTokenRepository;
use crate::utils::{
    TokenKind, TokenPair, generate_token_pair, hash_password, verify_password, verify_token,
};

const MIN_PASSWORD_LENGTH: usize = 8;

pub fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split('.')
                    .filter(|part| !part.is_empty())
                    .count()
                    >= 2
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!("邮箱格式无效: {}", email)))
    }
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "密码长度至少为{}位",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

pub async fn register(pool: &PgPool, email: &str, password: &str) -> Result<UserEntity, AppError> {
    let email = email.trim().to_lowercase();
    validate_email(&email)?;
    validate_password(password)?;

    if UserRepository::find_by_email(pool, &email).await?.is_some() {
        return Err(AppError::Conflict(format!("邮箱 {} 已被使用", email)));
    }

    let password_hash = hash_password(password)?;
    match UserRepository::create(pool, &email, &password_hash).await {
        Ok(user) => Ok(user),
        // 并发注册同一邮箱时由唯一约束兜底
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(AppError::Conflict(format!("邮箱 {} 已被使用", email)))
        }
        Err(e) => Err(e.into()),
    }
}

/// 签发令牌对并登记刷新令牌
pub async fn issue_tokens(
    refresh_tokens: &dyn RefreshTokenRepository,
    config: &Config,
    user_id: &Uuid,
) -> Result<TokenPair, AppError> {
    let pair = generate_token_pair(user_id, config)?;
    refresh_tokens
        .store_refresh_token(user_id, &pair.refresh_token, config.refresh_token_expiration())
        .await?;
    Ok(pair)
}

/// 邮箱不存在与密码错误返回同一个错误，不暴露账号是否存在
pub fn verify_credentials(
    user: Option<UserEntity>,
    password: &str,
) -> Result<UserEntity, AppError> {
    let user = user.ok_or(AppError::Unauthorized)?;
    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }
    Ok(user)
}

pub async fn login(
    pool: &PgPool,
    refresh_tokens: &dyn RefreshTokenRepository,
    config: &Config,
    email: &str,
    password: &str,
) -> Result<(UserEntity, TokenPair), AppError> {
    let email = email.trim().to_lowercase();
    let user = verify_credentials(UserRepository::find_by_email(pool, &email).await?, password)?;

    let pair = issue_tokens(refresh_tokens, config, &user.id).await?;
    tracing::info!("User {} logged in", user.id);
    Ok((user, pair))
}

/// 用刷新令牌换取新的令牌对
///
/// 每个刷新令牌只能使用一次，旧令牌在签发新令牌前作废。
pub async fn refresh(
    refresh_tokens: &dyn RefreshTokenRepository,
    config: &Config,
    refresh_token: &str,
) -> Result<TokenPair, AppError> {
    let claims = verify_token(refresh_token, config).map_err(|_| AppError::Unauthorized)?;
    if claims.kind != TokenKind::Refresh {
        return Err(AppError::Unauthorized);
    }

    let user_id = claims.user_id().ok_or(AppError::Unauthorized)?;
    if !refresh_tokens.consume_refresh_token(&user_id, refresh_token).await? {
        tracing::warn!("Rejected unknown or reused refresh token for user {}", user_id);
        return Err(AppError::Unauthorized);
    }

    issue_tokens(refresh_tokens, config, &user_id).await
}

pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<UserEntity, AppError> {
    UserRepository::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("用户不存在".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_emails_are_rejected() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("alice.smith@mail.example.org").is_ok());

        let malformed = [
            "",
            "alice",
            "@example.com",
            "alice@",
            "alice@example",
            "a@b@c.com",
            "alice@.com",
            "al ice@example.com",
        ];
        for email in malformed {
            assert!(validate_email(email).is_err(), "{email} should be rejected");
        }
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
    }

    fn user_with_password(password: &str) -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            email: "alice@example.com".into(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn unknown_email_and_wrong_password_fail_alike() {
        let unknown = verify_credentials(None, "password123");
        let wrong = verify_credentials(Some(user_with_password("password123")), "password124");

        assert!(matches!(unknown, Err(AppError::Unauthorized)));
        assert!(matches!(wrong, Err(AppError::Unauthorized)));
    }

    #[test]
    fn matching_password_returns_the_user() {
        let user = user_with_password("password123");
        let id = user.id;

        assert_eq!(verify_credentials(Some(user), "password123").unwrap().id, id);
    }
}
