pub mod auth_debug;
pub mod login;
