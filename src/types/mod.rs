//! Shared primitive types.
mod action;
pub use action::*;

mod asset;
pub use asset::Asset;

mod call;
pub use call::BatchCall;

mod erc20;
pub use erc20::*;

mod gas;
pub use gas::{Eip1559Fees, GasFeeParamsBySpeed, GasParams, GasSpeed};

mod outcome;
pub use outcome::ExecutionOutcome;

mod params;
pub use params::*;

mod quote;
pub use quote::{CrosschainQuote, Quote};

mod rap;
pub use rap::{Rap, RapType};

mod transaction;
pub use transaction::{PendingTransaction, TransactionKind};
