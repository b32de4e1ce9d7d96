//! Rap engine configuration.
use crate::constants::{
    BASE_CHAIN_ID, BASE_NODE_ACK_DELAY_MS, DEFAULT_NODE_ACK_DELAY_MS, MAINNET_CHAIN_ID,
    MAINNET_NODE_ACK_DELAY_MS, TEST_NODE_ACK_DELAY_MS,
};
use alloy::primitives::{Address, ChainId};
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
    time::Duration,
};

/// Rap engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Whether atomic execution may be attempted at all.
    ///
    /// When disabled the delegation probe is never called and every rap runs sequentially.
    #[serde(default = "default_delegation_enabled")]
    pub delegation_enabled: bool,
    /// Whether the engine runs under test.
    ///
    /// Forces the acknowledgment delay on every chain, including mainnet.
    #[serde(default)]
    pub test_mode: bool,
    /// Acknowledgment delays between sequential actions.
    #[serde(default)]
    pub node_ack: NodeAckConfig,
    /// Chains atomic execution is enabled on. `None` enables every chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atomic_chains: Option<BTreeSet<ChainId>>,
    /// Batching implementation accounts must be delegated to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegation_contract: Option<Address>,
}

const fn default_delegation_enabled() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delegation_enabled: default_delegation_enabled(),
            test_mode: false,
            node_ack: NodeAckConfig::default(),
            atomic_chains: None,
            delegation_contract: None,
        }
    }
}

impl EngineConfig {
    /// Enables or disables atomic execution.
    pub fn with_delegation_enabled(mut self, enabled: bool) -> Self {
        self.delegation_enabled = enabled;
        self
    }

    /// Sets test mode.
    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    /// Sets the acknowledgment delays.
    pub fn with_node_ack(mut self, node_ack: NodeAckConfig) -> Self {
        self.node_ack = node_ack;
        self
    }

    /// Restricts atomic execution to `chains`.
    pub fn with_atomic_chains(mut self, chains: Option<BTreeSet<ChainId>>) -> Self {
        self.atomic_chains = chains;
        self
    }

    /// Sets the batching implementation accounts must be delegated to.
    pub fn with_delegation_contract(mut self, contract: Option<Address>) -> Self {
        self.delegation_contract = contract;
        self
    }

    /// Whether a delay must be inserted between sequential actions on `chain_id`.
    pub fn should_delay_for_node_ack(&self, chain_id: ChainId) -> bool {
        chain_id != MAINNET_CHAIN_ID || self.test_mode
    }

    /// The delay inserted between sequential actions on `chain_id`.
    pub fn node_ack_delay(&self, chain_id: ChainId) -> Duration {
        self.node_ack.delay(chain_id, self.test_mode)
    }

    /// Load from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("failed to read config file: {}", path.display()))?;
        let config = serde_yaml::from_reader(&file)
            .wrap_err_with(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save to a YAML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> eyre::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Delays giving a node time to expose a just-broadcast transaction to nonce and state reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAckConfig {
    /// Delay on Ethereum mainnet.
    #[serde(with = "crate::serde::duration_ms")]
    pub mainnet: Duration,
    /// Delay on Base.
    #[serde(with = "crate::serde::duration_ms")]
    pub base: Duration,
    /// Delay on every other chain.
    #[serde(with = "crate::serde::duration_ms")]
    pub default: Duration,
    /// Delay on every chain in test mode.
    #[serde(with = "crate::serde::duration_ms")]
    pub test: Duration,
    /// Per-chain delays, taking precedence over the above outside test mode.
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        with = "crate::serde::duration_ms::map"
    )]
    pub overrides: BTreeMap<ChainId, Duration>,
}

impl Default for NodeAckConfig {
    fn default() -> Self {
        Self {
            mainnet: Duration::from_millis(MAINNET_NODE_ACK_DELAY_MS),
            base: Duration::from_millis(BASE_NODE_ACK_DELAY_MS),
            default: Duration::from_millis(DEFAULT_NODE_ACK_DELAY_MS),
            test: Duration::from_millis(TEST_NODE_ACK_DELAY_MS),
            overrides: BTreeMap::new(),
        }
    }
}

impl NodeAckConfig {
    /// Overrides the delay of `chain_id`.
    pub fn with_override(mut self, chain_id: ChainId, delay: Duration) -> Self {
        self.overrides.insert(chain_id, delay);
        self
    }

    /// The delay for `chain_id`.
    pub fn delay(&self, chain_id: ChainId, test_mode: bool) -> Duration {
        if test_mode {
            return self.test;
        }
        if let Some(delay) = self.overrides.get(&chain_id) {
            return *delay;
        }
        match chain_id {
            MAINNET_CHAIN_ID => self.mainnet,
            BASE_CHAIN_ID => self.base,
            _ => self.default,
        }
    }
}
