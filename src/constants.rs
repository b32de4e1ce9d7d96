//! Rap engine constants.

use alloy::primitives::{Address, ChainId, address};

/// Ethereum mainnet chain id.
pub const MAINNET_CHAIN_ID: ChainId = 1;

/// Base mainnet chain id.
pub const BASE_CHAIN_ID: ChainId = 8453;

/// Placeholder address swap APIs use for a chain's native asset.
pub const NATIVE_ASSET_SENTINEL: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Acknowledgment delay in milliseconds on Ethereum mainnet.
pub const MAINNET_NODE_ACK_DELAY_MS: u64 = 0;

/// Acknowledgment delay in milliseconds on Base.
///
/// Base nodes are the slowest to expose a freshly broadcast transaction to nonce reads.
pub const BASE_NODE_ACK_DELAY_MS: u64 = 2_500;

/// Acknowledgment delay in milliseconds on every other chain.
pub const DEFAULT_NODE_ACK_DELAY_MS: u64 = 500;

/// Acknowledgment delay in milliseconds when running under test, so approvals can settle.
pub const TEST_NODE_ACK_DELAY_MS: u64 = 5_000;

/// EIP-1193 error code for a request the user rejected.
pub const USER_REJECTED_REQUEST_CODE: i64 = 4001;

/// Error name wallet libraries use for a rejected signing request.
pub const USER_REJECTED_REQUEST_NAME: &str = "UserRejectedRequestError";

/// Ethers-style string code for a rejected signing request.
pub const ACTION_REJECTED_REASON: &str = "ACTION_REJECTED";

/// Upper bound on how many nested causes are inspected when classifying an error.
pub const MAX_CAUSE_DEPTH: usize = 16;

/// Message reported when an atomic attempt produces no calls.
pub const NO_CALLS_MESSAGE: &str = "no calls to execute";

/// Message reported when the first sequential action returns without a nonce.
pub const MISSING_FIRST_NONCE_MESSAGE: &str = "first action did not yield a nonce";
