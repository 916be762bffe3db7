// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::utils::format_phone;

/// Account profile returned by the login endpoint.
/// Field names follow the backend wire contract; values are opaque
/// pass-through data owned by the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userid")]
    pub user_id: i64,
    #[serde(rename = "fullname", default)]
    pub full_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(rename = "areacode", default)]
    pub area_code: String,
    #[serde(rename = "contactno", default)]
    pub contact_no: String,
    #[serde(rename = "useremail", default)]
    pub user_email: String,
    #[serde(rename = "socialemail", default)]
    pub social_email: String,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "profileimagepath", default)]
    pub profile_image_path: String,
    #[serde(rename = "isnotificationenabled", default)]
    pub is_notification_enabled: bool,
    #[serde(rename = "usertype", default)]
    pub user_type: i32,
    #[serde(rename = "isactive", default)]
    pub is_active: bool,
    #[serde(rename = "islogin", default)]
    pub is_login: bool,
    #[serde(rename = "isadmin", default)]
    pub is_admin: bool,
    #[serde(rename = "createddate", default)]
    pub created_date: Option<String>,
    #[serde(rename = "updateddate", default)]
    pub updated_date: Option<String>,
}

impl UserProfile {
    pub fn display_contact(&self) -> String {
        format_phone(&self.area_code, &self.contact_no)
    }
}

/// A single issued token with its server-side expiry stamp.
/// The local expiry timer is driven by the JWT `exp` claim instead of
/// `expires`; both describe the same instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    #[serde(default)]
    pub expires: Option<i64>,
}

/// Access/refresh token pair returned on login.
/// The refresh token is stored but never exchanged for a new access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub tokens: TokenPair,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "fullname")]
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "areacode")]
    pub area_code: String,
    #[serde(rename = "contactno")]
    pub contact_no: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}
