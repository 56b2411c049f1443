// 业务服务层
// 路由只负责解析请求与序列化响应，业务规则在这里

pub mod qr_code_token;
pub mod user;
