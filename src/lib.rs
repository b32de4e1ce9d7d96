//! # Raps
//!
//! Planning and execution of raps, the composite on-chain operations of a wallet: swaps,
//! cross-chain swaps and claims, each made of an ordered sequence of actions such as an ERC-20
//! unlock followed by the swap itself.
//!
//! A [`RapFactory`](factory::RapFactory) turns an intent into a [`Rap`](types::Rap), and a
//! [`RapEngine`](engine::RapEngine) executes it, either atomically as one batched transaction or
//! action by action.

pub mod actions;
pub mod approval;
pub mod cli;
pub mod config;
pub mod constants;
pub mod delegation;
pub mod engine;
pub mod error;
pub mod factory;
pub mod metrics;
pub mod provider;
pub mod replay;
pub mod serde;
pub mod signers;
pub mod storage;
pub mod types;
pub mod validation;
