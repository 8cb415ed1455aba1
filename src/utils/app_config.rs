use std::env;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_RANDOM_ACTIVITY_URL: &str = "https://www.boredapi.com/api/activity";
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub random_activity_url: String,
    pub cors_allowed_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        AppConfig {
            bind_addr: read("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            database_url: read("DATABASE_URL"),
            random_activity_url: read("RANDOM_ACTIVITY_URL")
                .unwrap_or_else(|| DEFAULT_RANDOM_ACTIVITY_URL.to_string()),
            cors_allowed_origin: read("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGIN.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.database_url, None);
        assert_eq!(config.random_activity_url, DEFAULT_RANDOM_ACTIVITY_URL);
        assert_eq!(config.cors_allowed_origin, DEFAULT_CORS_ALLOWED_ORIGIN);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("DATABASE_URL", "postgres://localhost/activities"),
            ("RANDOM_ACTIVITY_URL", "http://localhost:4000/random"),
        ]);

        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/activities"));
        assert_eq!(config.random_activity_url, "http://localhost:4000/random");
    }

    #[test]
    fn blank_database_url_is_unset() {
        let config = config_from(&[("DATABASE_URL", "  ")]);
        assert_eq!(config.database_url, None);
    }
}
