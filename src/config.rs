use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://archive-it.org";
pub const DEFAULT_OUTPUT_DIR: &str = "../output";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        base_url: get_env_or_default("ARCHIVE_IT_BASE_URL", DEFAULT_BASE_URL),
        output_dir: get_env_or_default("ARCHIVE_IT_OUTPUT_DIR", DEFAULT_OUTPUT_DIR),
        timeout_secs: parse_timeout_secs(get_env_opt("ARCHIVE_IT_TIMEOUT_SECS").as_deref()),
    }
});

pub struct Config {
    pub base_url: String,
    pub output_dir: String,
    /// Unset means requests may block indefinitely.
    pub timeout_secs: Option<u64>,
}

/// A value that is not a whole number of seconds is reported and ignored.
pub fn parse_timeout_secs(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim();
    match raw.parse() {
        Ok(secs) => Some(secs),
        Err(e) => {
            log::warn!("ignoring ARCHIVE_IT_TIMEOUT_SECS={raw:?} ({e}), requests will not time out");
            None
        }
    }
}

fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    get_env_opt(key).unwrap_or_else(|| default.to_string())
}
