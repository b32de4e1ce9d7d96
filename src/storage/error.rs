/// Errors returned by [`StorageApi`](super::StorageApi).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Only submitted transactions can be tracked.
    #[error("transaction has no hash")]
    MissingHash,
    /// An internal error occurred.
    #[error(transparent)]
    Internal(#[from] eyre::Error),
}
