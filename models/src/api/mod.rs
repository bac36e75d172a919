pub mod error_payload;
pub mod user_info;
