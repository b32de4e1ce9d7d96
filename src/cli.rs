//! # Raps CLI
use crate::{
    config::EngineConfig,
    delegation::{DelegationProbe, ProviderDelegationProbe},
    factory::RapFactory,
    provider::{ProviderAllowanceReader, connect_http_providers},
    types::RapParameters,
};
use alloy::primitives::{Address, ChainId};
use clap::{Parser, Subcommand};
use eyre::{Context, OptionExt};
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};
use url::Url;

/// Plans and inspects raps, composite on-chain operations of a wallet.
#[derive(Debug, Parser)]
#[command(author, about = "Raps", long_about = None)]
pub struct Args {
    /// The configuration file.
    ///
    /// If missing, the default configuration is used.
    #[arg(long, value_name = "CONFIG", env = "RAPS_CONFIG", default_value = "raps.yaml")]
    pub config: PathBuf,
    /// The RPC endpoint of a chain, in a format of `chain_id=url`.
    #[arg(long = "rpc", value_name = "CHAIN_ID=URL", value_parser = parse_chain_url)]
    pub rpcs: Vec<(ChainId, Url)>,
    /// The command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Commands available in the CLI.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Builds the rap of an intent and prints it as JSON.
    Plan {
        /// JSON file holding the rap parameters.
        #[arg(long, value_name = "FILE")]
        intent: PathBuf,
    },
    /// Checks whether an account can execute raps atomically.
    Probe {
        /// The account to probe.
        #[arg(long, value_name = "ADDRESS")]
        address: Address,
        /// The chain to probe on.
        #[arg(long, value_name = "CHAIN_ID")]
        chain_id: ChainId,
    },
    /// Writes the default configuration to the configuration file.
    InitConfig,
}

impl Args {
    /// Run the command.
    pub async fn run(self) -> eyre::Result<()> {
        let config = self.load_config()?;
        let providers = connect_http_providers(self.rpcs);

        match self.command {
            Command::Plan { intent } => {
                let content = std::fs::read_to_string(&intent)
                    .wrap_err_with(|| format!("failed to read intent: {}", intent.display()))?;
                let parameters: RapParameters = serde_json::from_str(&content)
                    .wrap_err_with(|| format!("failed to parse intent: {}", intent.display()))?;

                let factory = RapFactory::new(Arc::new(ProviderAllowanceReader::new(providers)));
                let rap = factory.create_rap_by_intent_type(&parameters).await?;
                info!(rap = %rap.name(), "planned rap");
                println!("{}", serde_json::to_string_pretty(&rap)?);
            }
            Command::Probe { address, chain_id } => {
                if !config.delegation_enabled {
                    warn!("atomic execution is disabled in the configuration");
                }
                let probe = ProviderDelegationProbe::new(providers)
                    .with_atomic_chains(config.atomic_chains.clone())
                    .with_delegation_contract(config.delegation_contract);
                let support = probe.supports_delegation(address, chain_id).await?;
                match support.reason {
                    None => println!("{address} supports atomic execution on chain {chain_id}"),
                    Some(reason) => println!("{address} cannot execute atomically: {reason}"),
                }
            }
            Command::InitConfig => {
                config.save_to_file(&self.config)?;
                info!(path = %self.config.display(), "wrote configuration");
            }
        }

        Ok(())
    }

    fn load_config(&self) -> eyre::Result<EngineConfig> {
        if self.config.exists() {
            EngineConfig::load_from_file(&self.config)
        } else {
            Ok(EngineConfig::default())
        }
    }
}

/// Parses a string representing a pair of chain id and a url in a format of "chain_id=url".
fn parse_chain_url(arg: &str) -> eyre::Result<(ChainId, Url)> {
    let (chain_id, url) = arg.split_once('=').ok_or_eyre("expected chain_id=url argument")?;

    Ok((chain_id.parse()?, url.parse()?))
}
