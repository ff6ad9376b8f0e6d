//! Session issuance and the cookie-based auth gate.
//!
//! Credentials live in an in-memory map of username to hashed password.
//! A successful login sets an HttpOnly session cookie; the auth middleware
//! only checks for the cookie's presence, matching the original behavior of
//! this service (no server-side session store).

use std::collections::HashMap;
use std::sync::RwLock;

use axum::extract::Request;
use axum::http::header::COOKIE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use sha2::{Digest, Sha256};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sitelens_session";

/// Session cookie lifetime in seconds.
pub const SESSION_MAX_AGE: u64 = 3600;

/// Hashes a password for storage/comparison.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// In-memory credential store.
pub struct LoginService {
    users: RwLock<HashMap<String, String>>,
}

impl LoginService {
    /// Creates the store seeded with the default demo account.
    pub fn new() -> Self {
        let mut users = HashMap::new();
        users.insert("user".to_string(), hash_password("password"));
        Self { users: RwLock::new(users) }
    }

    /// Checks a username/password pair against the stored hashes.
    pub fn validate_credentials(&self, username: &str, password: &str) -> bool {
        let users = self.users.read().unwrap();
        users.get(username).is_some_and(|stored| *stored == hash_password(password))
    }
}

impl Default for LoginService {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the Set-Cookie value for a fresh session token.
pub fn session_cookie(token: &str) -> String {
    format!("{}={}; Max-Age={}; HttpOnly; Path=/", SESSION_COOKIE, token, SESSION_MAX_AGE)
}

fn has_session_cookie(header: &str) -> bool {
    header.split(';').any(|pair| {
        let mut parts = pair.trim().splitn(2, '=');
        parts.next() == Some(SESSION_COOKIE) && parts.next().is_some_and(|v| !v.is_empty())
    })
}

/// Middleware guarding session-protected routes.
///
/// Requests without the session cookie are redirected to the login page.
pub async fn require_session(request: Request, next: Next) -> Response {
    let authenticated = request
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(has_session_cookie);

    if authenticated {
        next.run(request).await
    } else {
        Redirect::to("/").into_response()
    }
}
