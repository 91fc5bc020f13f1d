/// Application configuration module
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub spacex_api_url: String,
    pub bind_addr: String,
    pub refresh_seconds: u64,
    pub http_timeout_seconds: u64,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let spacex_api_url = env::var("SPACEX_API_URL")
            .unwrap_or_else(|_| "https://api.spacexdata.com/v4".to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let refresh_seconds = env_u64("REFRESH_EVERY_SECONDS", 3600);
        if refresh_seconds == 0 {
            anyhow::bail!("REFRESH_EVERY_SECONDS must be positive");
        }

        Ok(Self {
            spacex_api_url,
            bind_addr,
            refresh_seconds,
            http_timeout_seconds: env_u64("HTTP_TIMEOUT_SECONDS", 30),
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_u64_default_when_missing() {
        assert_eq!(env_u64("LAUNCH_DASHBOARD_TEST_UNSET", 42), 42);
    }

    #[test]
    fn test_env_u64_default_when_invalid() {
        env::set_var("LAUNCH_DASHBOARD_TEST_INVALID", "soon");
        assert_eq!(env_u64("LAUNCH_DASHBOARD_TEST_INVALID", 7), 7);
    }

    #[test]
    fn test_env_u64_parses() {
        env::set_var("LAUNCH_DASHBOARD_TEST_VALID", "120");
        assert_eq!(env_u64("LAUNCH_DASHBOARD_TEST_VALID", 7), 120);
    }
}
