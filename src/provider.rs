//! Chain collaborators backed by alloy providers.

use crate::{approval::AllowanceReader, error::ActionError, types::IERC20};
use alloy::{
    contract,
    primitives::{Address, ChainId, U256, map::HashMap},
    providers::{DynProvider, Provider, ProviderBuilder},
};
use async_trait::async_trait;
use tracing::{instrument, trace};
use url::Url;

/// Connects an HTTP provider for every `(chain, url)` pair.
pub fn connect_http_providers(
    endpoints: impl IntoIterator<Item = (ChainId, Url)>,
) -> HashMap<ChainId, DynProvider> {
    endpoints
        .into_iter()
        .map(|(chain_id, url)| (chain_id, ProviderBuilder::new().connect_http(url).erased()))
        .collect()
}

/// [`AllowanceReader`] calling `allowance` on the token contract.
#[derive(Debug, Clone)]
pub struct ProviderAllowanceReader {
    providers: HashMap<ChainId, DynProvider>,
}

impl ProviderAllowanceReader {
    /// Creates a new reader over `providers`.
    pub fn new(providers: HashMap<ChainId, DynProvider>) -> Self {
        Self { providers }
    }

    fn provider(&self, chain_id: ChainId) -> Result<&DynProvider, ActionError> {
        self.providers
            .get(&chain_id)
            .ok_or_else(|| eyre::eyre!("no provider configured for chain {chain_id}").into())
    }
}

#[async_trait]
impl AllowanceReader for ProviderAllowanceReader {
    #[instrument(skip(self))]
    async fn allowance(
        &self,
        owner: Address,
        token: Address,
        spender: Address,
        chain_id: ChainId,
    ) -> Result<U256, ActionError> {
        let provider = self.provider(chain_id)?;
        let allowance = IERC20::new(token, provider)
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|err| match err {
                contract::Error::TransportError(err) => ActionError::Rpc(err),
                err => ActionError::Internal(err.into()),
            })?;
        trace!(%allowance, "read allowance");
        Ok(allowance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[tokio::test]
    async fn unknown_chain() {
        let reader = ProviderAllowanceReader::new(HashMap::default());
        let err = reader
            .allowance(
                address!("1111111111111111111111111111111111111111"),
                address!("2222222222222222222222222222222222222222"),
                address!("3333333333333333333333333333333333333333"),
                10,
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no provider configured for chain 10");
    }

    #[test]
    fn connects_one_provider_per_chain() {
        let providers = connect_http_providers([
            (1, "http://localhost:8545".parse().unwrap()),
            (8453, "http://localhost:8546".parse().unwrap()),
        ]);
        assert_eq!(providers.len(), 2);
        assert!(providers.contains_key(&8453));
    }
}
