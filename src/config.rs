use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// IANA timezone name in which all series wall-clock times are
    /// interpreted. One zone for the whole deployment, not per-series.
    pub timezone: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            timezone: env::var("TIMEZONE").unwrap_or_else(|_| "Europe/Copenhagen".to_string()),
        }
    }
}
