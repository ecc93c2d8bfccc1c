use std::time::Duration;

use serde::Serialize;

/// Named request quota for one class of endpoint.
///
/// Route handlers pick a profile instead of inventing ad hoc numbers, so the
/// same class of endpoint is throttled the same way everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitProfile {
    pub name: &'static str,
    pub limit: u32,
    pub window_secs: u64,
}

impl RateLimitProfile {
    pub const AUTH_LOGIN: Self = Self::custom("auth.login", 5, 5 * 60);
    pub const AUTH_REGISTER: Self = Self::custom("auth.register", 3, 60 * 60);
    pub const AUTH_FORGOT_PASSWORD: Self = Self::custom("auth.forgot_password", 3, 60 * 60);
    pub const AUTH_RESET_PASSWORD: Self = Self::custom("auth.reset_password", 5, 60 * 60);

    pub const API_READ: Self = Self::custom("api.read", 100, 60);
    pub const API_WRITE: Self = Self::custom("api.write", 30, 60);
    pub const API_UPLOAD: Self = Self::custom("api.upload", 10, 60);

    pub const PUBLIC_BLOG: Self = Self::custom("public.blog", 200, 60);
    pub const PUBLIC_CONTACT: Self = Self::custom("public.contact", 5, 60 * 60);

    pub const ALL: [Self; 9] = [
        Self::AUTH_LOGIN,
        Self::AUTH_REGISTER,
        Self::AUTH_FORGOT_PASSWORD,
        Self::AUTH_RESET_PASSWORD,
        Self::API_READ,
        Self::API_WRITE,
        Self::API_UPLOAD,
        Self::PUBLIC_BLOG,
        Self::PUBLIC_CONTACT,
    ];

    pub const fn custom(name: &'static str, limit: u32, window_secs: u64) -> Self {
        Self {
            name,
            limit,
            window_secs,
        }
    }

    /// Looks up a predefined profile, e.g. `"auth.login"`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name == name)
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Limiter identifier for `client` under this profile.
    pub fn counter_key(&self, client: &str) -> String {
        format!("{}:{}", self.name, client)
    }
}
