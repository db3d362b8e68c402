/// Errors surfaced by the store
///
/// `Conflict` and `NotFound` are semantic outcomes the calling domain
/// maps onto its own error taxonomy; `Database` wraps everything the
/// driver reports.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness invariant rejected the write
    #[error("record already exists")]
    Conflict,

    /// The referenced row does not exist
    #[error("record not found")]
    NotFound,

    /// Driver-level failure (connection, pool, query)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Fold unique-constraint violations into `Conflict`
    pub(crate) fn from_write(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Conflict,
            _ => Self::Database(error),
        }
    }
}
