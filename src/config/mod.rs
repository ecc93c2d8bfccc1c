use std::env;
use std::str::FromStr;
use std::time::Duration;

mod rate_limit;

pub use rate_limit::RateLimitProfile;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub cache_default_ttl_secs: u64,
    pub cache_cleanup_interval_secs: u64,
    pub rate_limit_window_secs: u64,
    pub rate_limit_requests: u32,
    pub rate_limit_cleanup_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "::".into(),
            server_port: 3000,
            api_base_uri: "/api".into(),
            cache_default_ttl_secs: 3600,
            cache_cleanup_interval_secs: 5 * 60,
            rate_limit_window_secs: 60,
            rate_limit_requests: 100,
            rate_limit_cleanup_interval_secs: 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source. Missing variables
    /// fall back to [`Config::default`]; present but unparsable ones fail.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Config {
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var(&lookup, "SERVER_PORT", defaults.server_port)?,
            api_base_uri: lookup("API_BASE_URI").unwrap_or(defaults.api_base_uri),
            cache_default_ttl_secs: parse_secs(
                &lookup,
                "CACHE_DEFAULT_TTL",
                defaults.cache_default_ttl_secs,
            )?,
            cache_cleanup_interval_secs: parse_secs(
                &lookup,
                "CACHE_CLEANUP_INTERVAL",
                defaults.cache_cleanup_interval_secs,
            )?,
            rate_limit_window_secs: parse_secs(
                &lookup,
                "RATE_LIMIT_WINDOW",
                defaults.rate_limit_window_secs,
            )?,
            rate_limit_requests: parse_var(
                &lookup,
                "RATE_LIMIT_REQUESTS",
                defaults.rate_limit_requests,
            )?,
            rate_limit_cleanup_interval_secs: parse_secs(
                &lookup,
                "RATE_LIMIT_CLEANUP_INTERVAL",
                defaults.rate_limit_cleanup_interval_secs,
            )?,
        })
    }

    pub fn cache_default_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_default_ttl_secs)
    }

    pub fn cache_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cache_cleanup_interval_secs)
    }

    pub fn rate_limit_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.rate_limit_cleanup_interval_secs)
    }

    /// Profile applied to every route that does not pick a stricter one.
    pub fn default_rate_limit(&self) -> RateLimitProfile {
        RateLimitProfile::custom(
            "default",
            self.rate_limit_requests,
            self.rate_limit_window_secs,
        )
    }

    /// The default profile followed by every named one.
    pub fn rate_limit_profiles(&self) -> Vec<RateLimitProfile> {
        std::iter::once(self.default_rate_limit())
            .chain(RateLimitProfile::ALL)
            .collect()
    }

    /// Resolves `"default"` or a named profile such as `"auth.login"`.
    pub fn rate_limit_profile(&self, name: &str) -> Option<RateLimitProfile> {
        let default = self.default_rate_limit();
        if name == default.name {
            return Some(default);
        }
        RateLimitProfile::from_name(name)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}

/// Like [`parse_var`] for a number of seconds, which may carry one trailing
/// unit marker, e.g. "60s".
fn parse_secs<F>(lookup: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => {
            let trimmed = raw.trim();
            trimmed
                .strip_suffix('s')
                .unwrap_or(trimmed)
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value: raw })
        }
        None => Ok(default),
    }
}
