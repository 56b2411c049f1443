pub mod qr_code_token;
pub mod user;
