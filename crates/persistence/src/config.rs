//! Store configuration loaded from environment variables.

/// Record store configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `DATABASE_URL`: PostgreSQL connection string (default: unset)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: `5`)
/// - `DATABASE_RUN_MIGRATIONS`: run migrations on connect (default: `true`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            run_migrations: lookup("DATABASE_RUN_MIGRATIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.run_migrations),
        }
    }

    /// Returns a copy of this configuration pointing at `url`.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: 5,
            run_migrations: true,
        }
    }
}
