use crate::{constants::MAX_CAUSE_DEPTH, error::ActionError};

/// Whether `err`, or any error it wraps, is an explicit rejection by the user.
///
/// Wallets and providers tend to bury the rejection under one or more generic errors, so the
/// cause chain is followed for at most [`MAX_CAUSE_DEPTH`] levels.
pub fn is_user_rejection(err: &ActionError) -> bool {
    let mut current = Some(err);
    for _ in 0..MAX_CAUSE_DEPTH {
        let Some(err) = current else { return false };
        if err.is_rejection_marker() {
            return true;
        }
        current = err.cause();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::ACTION_REJECTED_REASON,
        error::{ProviderError, ValidationError},
    };
    use alloy::{rpc::json_rpc::ErrorPayload, transports::RpcError};

    #[test]
    fn direct_markers() {
        assert!(is_user_rejection(&ActionError::user_rejected("User rejected")));
        assert!(is_user_rejection(&ActionError::Provider(
            ProviderError::new("user denied").with_reason(ACTION_REJECTED_REASON)
        )));
        assert!(is_user_rejection(&ActionError::Provider(
            ProviderError::new("denied").with_name("UserRejectedRequestError")
        )));
        assert!(is_user_rejection(&ActionError::Provider(
            ProviderError::new("denied").with_code(4001)
        )));
        assert!(is_user_rejection(&ActionError::from(eyre::Report::new(
            ProviderError::new("denied").with_code(4001)
        ))));

        let payload =
            ErrorPayload { code: 4001, message: "User rejected the request.".into(), data: None };
        assert!(is_user_rejection(&ActionError::Rpc(RpcError::ErrorResp(payload))));
    }

    #[test]
    fn nested_markers() {
        let err = ActionError::wrap(
            "transaction failed",
            ActionError::wrap(
                "batch failed",
                ActionError::wrap("request failed", ActionError::user_rejected("User rejected")),
            ),
        );
        assert!(is_user_rejection(&err));
    }

    #[test]
    fn other_errors() {
        assert!(!is_user_rejection(&ActionError::provider("insufficient funds")));
        assert!(!is_user_rejection(&ActionError::wrap(
            "failed",
            ActionError::Provider(ProviderError::new("nonce too low").with_code(-32000))
        )));
        assert!(!is_user_rejection(&ActionError::Validation(ValidationError::MissingField("to"))));
        assert!(!is_user_rejection(&ActionError::from(eyre::eyre!("boom"))));
    }

    #[test]
    fn cause_chain_is_bounded() {
        let mut err = ActionError::user_rejected("User rejected");
        for depth in 0..MAX_CAUSE_DEPTH {
            err = ActionError::wrap(format!("wrapper {depth}"), err);
        }
        assert!(!is_user_rejection(&err));
    }
}
