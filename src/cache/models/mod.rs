/// 缓存数据模型
/// 定义缓存数据的结构体
// 已授权二维码令牌缓存模型
pub mod authorized_token;

pub use authorized_token::AuthorizedQrCodeToken;
