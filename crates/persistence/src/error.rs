use domain::RepositoryError;
use thiserror::Error;

/// Errors that can occur when interacting with a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A primary key is already taken.
    #[error("Duplicate key in {table}: {key}")]
    UniqueViolation { table: &'static str, key: String },

    /// A row references a parent row that does not exist.
    #[error("Foreign key violation on {table}: {detail}")]
    ForeignKeyViolation { table: &'static str, detail: String },

    /// A row violates a column check such as `price > 0`.
    #[error("Check violation on {table}: {detail}")]
    CheckViolation { table: &'static str, detail: String },

    /// A value does not fit the column type it is stored in.
    #[error("Value for {table}.{column} out of range: {key}")]
    ValueOutOfRange {
        table: &'static str,
        column: &'static str,
        key: String,
    },

    /// An update that must touch exactly one row touched none.
    #[error("No row in {table} matches {key}")]
    NoRowsAffected { table: &'static str, key: String },

    /// The store could not be configured.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        RepositoryError::persistence(err)
    }
}

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
