use serde::{Deserialize, Serialize};

/// 已授权二维码令牌缓存数据模型
///
/// 受信设备确认登录后写入，按二维码内容标识存储，
/// 轮询方取走后即删除。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthorizedQrCodeToken {
    pub raw_content: String,
    pub access_token: String,
    pub refresh_token: String,
}
