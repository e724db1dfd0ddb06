pub mod api_error;
pub mod envelope;
pub mod i18n;
pub mod json_path;
