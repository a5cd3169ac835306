//! # Auth Client
//!
//! The login/sign-up network contract. Callers treat it as opaque: a call
//! either yields the signed-in [`User`] or a message to show.

use crate::model::{GoogleAuthRequest, LoginRequest, SignupRequest, User};
use serde::Serialize;
use std::sync::Arc;
use store_sync::{FetchRequest, ResourceFetcher, ResourceResult, MALFORMED_RESPONSE};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct AuthClient {
    fetcher: Arc<dyn ResourceFetcher>,
}

impl AuthClient {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self { fetcher }
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ResourceResult<User> {
        debug!("Sending request");
        self.post("/api/auth/login", &request, "Login failed").await
    }

    #[instrument(skip(self, request), fields(email = %request.email, role = ?request.role))]
    pub async fn signup(&self, request: SignupRequest) -> ResourceResult<User> {
        debug!("Sending request");
        self.post("/api/auth/signup", &request, "Signup failed").await
    }

    #[instrument(skip(self, request), fields(email = %request.email, role = ?request.role))]
    pub async fn google_signup(&self, request: GoogleAuthRequest) -> ResourceResult<User> {
        debug!("Sending request");
        self.post("/api/auth/googlesignup", &request, "Google login failed")
            .await
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B, fallback: &str) -> ResourceResult<User> {
        let body = match serde_json::to_value(body) {
            Ok(body) => body,
            Err(_) => return ResourceResult::error(MALFORMED_RESPONSE),
        };
        self.fetcher
            .fetch(FetchRequest::post(path, body).fallback_message(fallback))
            .await
            .decode()
    }
}
