/// 缓存操作
/// 提供缓存操作的功能实现

// 已授权二维码令牌缓存操作
pub mod authorized_token;

// 速率限制缓存操作
pub mod rate_limit;

// 刷新令牌缓存操作
pub mod refresh_token;

pub use authorized_token::AuthorizedTokenCacheOperations;
pub use rate_limit::RateLimitCacheOperations;
pub use refresh_token::RefreshTokenCacheOperations;
