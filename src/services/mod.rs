pub mod auth;
pub mod cancel;
pub mod password;
