//! Application configuration. Storage location, code-retry bound.

use serde::Deserialize;

/// Default upper bound on confirmation-code generation attempts per
/// booking before the conflict is surfaced as fatal.
pub const DEFAULT_CODE_ATTEMPT_LIMIT: u32 = 5;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding the SQLite database file. Unset = run on the
    /// in-memory store. Read from INNKEEPER_DATABASE_DIR.
    #[serde(default)]
    pub database_dir: Option<String>,

    /// Max confirmation-code generation attempts per booking. Read from
    /// INNKEEPER_CODE_ATTEMPT_LIMIT.
    #[serde(default)]
    pub code_attempt_limit: Option<u32>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("INNKEEPER"));
        if let Ok(path) = std::env::var("INNKEEPER_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the code attempt limit. Defaults to DEFAULT_CODE_ATTEMPT_LIMIT
    /// if unset; a configured zero is treated as unset rather than as a
    /// ledger that can never book.
    pub fn code_attempt_limit_or_default(&self) -> u32 {
        match self.code_attempt_limit {
            Some(0) | None => DEFAULT_CODE_ATTEMPT_LIMIT,
            Some(n) => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_attempt_limit_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.code_attempt_limit_or_default(), 5);

        let zero = AppConfig {
            code_attempt_limit: Some(0),
            ..AppConfig::default()
        };
        assert_eq!(zero.code_attempt_limit_or_default(), 5);

        let set = AppConfig {
            code_attempt_limit: Some(8),
            ..AppConfig::default()
        };
        assert_eq!(set.code_attempt_limit_or_default(), 8);
    }
}
