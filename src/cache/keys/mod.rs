/// 缓存键模块
/// 提供各种缓存键生成函数

// 二维码缓存键模块
pub mod qr_code_keys;

// 限流缓存键模块
pub mod rate_limit_keys;

// 刷新令牌缓存键模块
pub mod refresh_token_keys;

pub use qr_code_keys::authorized_token_key;
pub use rate_limit_keys::rate_limit_key;
pub use refresh_token_keys::refresh_token_key;
