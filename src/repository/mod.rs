// 存储抽象层
// 服务层只依赖这里的 trait，具体实现组合数据库与缓存

pub mod qr_code_token;
pub mod refresh_token;

pub use qr_code_token::{QrCodeTokenRepository, QrCodeTokenRepositoryImpl};
pub use refresh_token::{RefreshTokenRepository, RefreshTokenRepositoryImpl};
