use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// SQLITE_CONSTRAINT_UNIQUE (2067) or SQLITE_CONSTRAINT_PRIMARYKEY (1555).
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if matches!(e.code().as_deref(), Some("2067") | Some("1555"))
        )
    }

    /// SQLITE_CONSTRAINT_FOREIGNKEY (787).
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("787")
        )
    }

    /// Reclassifies a unique violation as `Conflict` so callers on a
    /// must-not-exist path get a typed error instead of a raw driver error.
    pub fn into_conflict(self, msg: &str) -> Self {
        if self.is_unique_violation() {
            StorageError::Conflict(msg.to_string())
        } else {
            self
        }
    }
}
