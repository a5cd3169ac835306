//! Request bodies for the authentication contract.

use super::user::Role;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Sign-in with an identity already verified by the Google popup.
#[derive(Debug, Clone, Serialize)]
pub struct GoogleAuthRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
}
