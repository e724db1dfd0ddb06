use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::json_path::display_text;

/// Seconds between OTP requests for the same mobile.
pub const OTP_RESEND_SECONDS: u32 = 120;

// ---- pricing API: OTP exchange ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpRequest {
    pub mobile: String,
}

/// `data` of `POST /auth/send-otp`. `token` is the exchange token that
/// authorizes the verify call; `otp` is only echoed by development servers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpData {
    pub token: String,
    #[serde(default)]
    pub otp: Option<Value>,
    #[serde(default)]
    pub is_new_user: bool,
}

impl SendOtpData {
    pub fn dev_otp(&self) -> Option<String> {
        self.otp
            .as_ref()
            .map(display_text)
            .filter(|otp| !otp.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamUser {
    pub id: Value,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub verified_at: Option<String>,
    #[serde(default)]
    pub panel_id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
}

/// `data` of `POST /auth/verify-otp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpData {
    pub token: String,
    pub user: UpstreamUser,
}

// ---- dashboard session ----

/// Body of the dashboard's own sign-in call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    /// Exchange token from the send-otp step.
    pub token: String,
    pub otp: String,
}

/// User as carried by the web session. `accessToken` is the pricing API
/// bearer token mirrored into the client's token store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub verified_at: Option<String>,
    #[serde(default)]
    pub panel_id: Option<Value>,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl SessionUser {
    pub fn from_verified(data: VerifyOtpData) -> Self {
        let user = data.user;
        let name = user.name.clone().or_else(|| user.mobile.clone());
        Self {
            id: display_text(&user.id),
            mobile: user.mobile,
            verified_at: user.verified_at,
            panel_id: user.panel_id,
            access_token: data.token,
            name,
        }
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.mobile.clone())
            .unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub expires: DateTime<Utc>,
}

/// Claims of the session JWT kept in the dashboard cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub user: SessionUser,
    pub iat: i64,
    pub exp: i64,
    /// Unique id of this sign-in.
    #[serde(default)]
    pub jti: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionStatus {
    #[default]
    Loading,
    Authenticated(Session),
    Unauthenticated,
}

impl SessionStatus {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Authenticated(_) => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}

/// Runtime settings the backend hands to the browser app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000/api/v1".to_string(),
            timeout_ms: 30_000,
        }
    }
}

fn digits_exactly(value: &str, count: usize) -> bool {
    value.len() == count && value.chars().all(|c| c.is_ascii_digit())
}

pub fn validate_mobile(mobile: &str) -> Result<(), &'static str> {
    if mobile.is_empty() {
        return Err("شماره موبایل الزامی است");
    }
    if !digits_exactly(mobile, 10) {
        return Err("شماره موبایل باید ۱۰ رقم باشد");
    }
    Ok(())
}

pub fn validate_otp(otp: &str) -> Result<(), &'static str> {
    if otp.is_empty() {
        return Err("کد تایید الزامی است");
    }
    if !digits_exactly(otp, 6) {
        return Err("کد تایید باید ۶ رقم باشد");
    }
    Ok(())
}

/// `125` → `2:05`.
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_user_uses_access_token_key() {
        let data: VerifyOtpData = serde_json::from_value(json!({
            "token": "abc.def",
            "user": { "id": 12, "mobile": "9121234567", "verified_at": "2024-05-01", "panel_id": 3 }
        }))
        .unwrap();
        let user = SessionUser::from_verified(data);
        assert_eq!(user.id, "12");
        assert_eq!(user.name.as_deref(), Some("9121234567"));

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["accessToken"], json!("abc.def"));
        assert!(value.get("access_token").is_none());
    }

    #[test]
    fn test_dev_otp_accepts_number_or_string() {
        let data: SendOtpData =
            serde_json::from_value(json!({ "token": "t", "otp": 123456, "is_new_user": true }))
                .unwrap();
        assert_eq!(data.dev_otp().as_deref(), Some("123456"));

        let data: SendOtpData = serde_json::from_value(json!({ "token": "t" })).unwrap();
        assert_eq!(data.dev_otp(), None);
        assert!(!data.is_new_user);
    }

    #[test]
    fn test_mobile_and_otp_format() {
        assert!(validate_mobile("9121234567").is_ok());
        assert!(validate_mobile("").is_err());
        assert!(validate_mobile("912123456").is_err());
        assert!(validate_mobile("91212345a7").is_err());

        assert!(validate_otp("123456").is_ok());
        assert!(validate_otp("12345").is_err());
        assert!(validate_otp("۱۲۳۴۵۶").is_err());
    }

    #[test]
    fn test_countdown_format() {
        assert_eq!(format_countdown(OTP_RESEND_SECONDS), "2:00");
        assert_eq!(format_countdown(65), "1:05");
        assert_eq!(format_countdown(0), "0:00");
    }
}
