use super::ValidationError;
use crate::constants::{
    ACTION_REJECTED_REASON, USER_REJECTED_REQUEST_CODE, USER_REJECTED_REQUEST_NAME,
};
use alloy::transports::{RpcError, TransportErrorKind};
use thiserror::Error;

/// Errors returned by action executors, atomic preparers and the chain collaborators the engine
/// talks to.
#[derive(Debug, Error)]
pub enum ActionError {
    /// A wallet or provider error, possibly wrapping further causes.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// An error returned by an RPC node.
    #[error(transparent)]
    Rpc(#[from] RpcError<TransportErrorKind>),
    /// The action was handed invalid input.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// An internal error occurred.
    #[error(transparent)]
    Internal(#[from] eyre::Error),
}

impl ActionError {
    /// Creates a plain [`ActionError::Provider`] with only a message.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(ProviderError::new(message))
    }

    /// Creates the error a wallet returns when the user declines to sign.
    pub fn user_rejected(message: impl Into<String>) -> Self {
        Self::Provider(
            ProviderError::new(message)
                .with_code(USER_REJECTED_REQUEST_CODE)
                .with_name(USER_REJECTED_REQUEST_NAME),
        )
    }

    /// Wraps `cause` into a new provider error carrying `message`.
    pub fn wrap(message: impl Into<String>, cause: Self) -> Self {
        Self::Provider(ProviderError::new(message).with_cause(cause))
    }

    /// The next error in the cause chain, if any.
    pub fn cause(&self) -> Option<&Self> {
        match self {
            Self::Provider(err) => err.cause.as_deref(),
            Self::Rpc(_) | Self::Validation(_) | Self::Internal(_) => None,
        }
    }

    /// Whether this error, on its own, marks an explicit rejection by the user.
    ///
    /// Does not look at nested causes, see [`crate::engine::is_user_rejection`].
    pub fn is_rejection_marker(&self) -> bool {
        match self {
            Self::Provider(err) => err.is_rejection_marker(),
            Self::Rpc(RpcError::ErrorResp(payload)) => payload.code == USER_REJECTED_REQUEST_CODE,
            Self::Rpc(_) | Self::Validation(_) => false,
            Self::Internal(report) => {
                report.downcast_ref::<ProviderError>().is_some_and(ProviderError::is_rejection_marker)
            }
        }
    }
}

/// An error shaped like the ones EIP-1193 providers and wallet libraries throw.
///
/// Providers frequently wrap the real failure in one or more generic errors, so the original
/// error is kept in [`ProviderError::cause`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProviderError {
    /// Numeric error code, e.g. `4001`.
    pub code: Option<i64>,
    /// String error code, e.g. `ACTION_REJECTED`.
    pub reason: Option<String>,
    /// Error class name, e.g. `UserRejectedRequestError`.
    pub name: Option<String>,
    /// Human readable message.
    pub message: String,
    /// The wrapped error.
    #[source]
    pub cause: Option<Box<ActionError>>,
}

impl ProviderError {
    /// Creates a new [`ProviderError`] with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { code: None, reason: None, name: None, message: message.into(), cause: None }
    }

    /// Sets the numeric error code.
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    /// Sets the string error code.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Sets the error class name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the wrapped error.
    pub fn with_cause(mut self, cause: ActionError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    fn is_rejection_marker(&self) -> bool {
        self.code == Some(USER_REJECTED_REQUEST_CODE)
            || self.reason.as_deref() == Some(ACTION_REJECTED_REASON)
            || self.name.as_deref() == Some(USER_REJECTED_REQUEST_NAME)
    }
}
