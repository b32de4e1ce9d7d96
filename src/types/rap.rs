use super::{ActionKind, RapAction};
use alloy::primitives::B256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The high-level intent a rap was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RapType {
    /// Same-chain swap, optionally preceded by an unlock.
    Swap,
    /// Cross-chain swap, optionally preceded by an unlock.
    CrosschainSwap,
    /// Reward claim.
    Claim,
    /// Reward claim followed by a bridge when the destination differs.
    ClaimBridge,
    /// Claim of a claimable position, optionally followed by a swap.
    ClaimClaimable,
}

impl RapType {
    /// Whether raps of this type may be folded into one atomic transaction.
    pub const fn supports_atomic(&self) -> bool {
        matches!(self, Self::Swap | Self::CrosschainSwap)
    }

    /// Name of the type, as used in logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Swap => "swap",
            Self::CrosschainSwap => "crosschainSwap",
            Self::Claim => "claim",
            Self::ClaimBridge => "claimBridge",
            Self::ClaimClaimable => "claimClaimable",
        }
    }
}

impl fmt::Display for RapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered sequence of actions making up one composite on-chain operation.
///
/// Positions are meaningful: an action may depend on any action before it, and nonces are
/// assigned in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rap {
    /// The actions, in execution order.
    pub actions: Vec<RapAction>,
}

impl Rap {
    /// Creates a new rap from `actions`.
    pub fn new(actions: Vec<RapAction>) -> Self {
        Self { actions }
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the rap has no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Kinds of the actions, in order.
    pub fn kinds(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.actions.iter().map(RapAction::kind)
    }

    /// Position of the first action of `kind`.
    pub fn position(&self, kind: ActionKind) -> Option<usize> {
        self.kinds().position(|k| k == kind)
    }

    /// Display name, e.g. `unlock + swap`.
    pub fn name(&self) -> String {
        self.kinds().map(|kind| kind.as_str()).collect::<Vec<_>>().join(" + ")
    }

    /// Records the hash of the transaction sent by the action at `index`.
    pub(crate) fn record_hash(&mut self, index: usize, hash: Option<B256>) {
        if let Some(action) = self.actions.get_mut(index) {
            action.transaction.hash = hash;
        }
    }
}
