//! Rap error types.
use alloy::primitives::{Address, ChainId};
use thiserror::Error;

mod action;
pub use action::{ActionError, ProviderError};

mod validation;
pub use validation::ValidationError;

/// The overarching error type returned while building a rap.
///
/// Execution never surfaces this type: an engine run always resolves into an
/// [`ExecutionOutcome`](crate::types::ExecutionOutcome).
#[derive(Debug, Error)]
pub enum RapError {
    /// An input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The current allowance could not be read.
    #[error("failed to read allowance of {token} for spender {spender} on chain {chain_id}")]
    AllowanceRead {
        /// The token whose allowance was queried.
        token: Address,
        /// The spender the allowance was queried for.
        spender: Address,
        /// The chain the query targeted.
        chain_id: ChainId,
        /// The underlying failure.
        #[source]
        source: ActionError,
    },
    /// The intent is missing data required to build its rap.
    #[error("{intent} intent requires {what}")]
    IncompleteIntent {
        /// Name of the intent.
        intent: &'static str,
        /// What was missing.
        what: &'static str,
    },
    /// An internal error occurred.
    #[error(transparent)]
    Internal(#[from] eyre::Error),
}
