const DEFAULT_DATABASE_PATH: &str = "world-records.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; missing or unparseable values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let log_filter = lookup("RUST_LOG")
            .or_else(|| lookup("LOG_FILTER"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.into());

        Config {
            database_path: lookup("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.into()),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            port,
            log_filter,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
