// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::artifact::ArtifactStore;
use crate::deployer::EvmDeployer;
use crate::transaction_config::TransactionConfig;
use crate::Network;
use alloy::network::{Ethereum, EthereumWallet};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest;
use std::env;
use std::str::FromStr;

/// environment variable to connect to a custom EVM network
pub const RPC_URL: &str = "RPC_URL";
const RPC_URL_BUILD_TIME_VAL: Option<&str> = option_env!("RPC_URL");
/// environment variable holding the key of the deploying account
pub const DEPLOYER_PRIVATE_KEY: &str = "DEPLOYER_PRIVATE_KEY";
/// environment variable pointing at the compiled contract artifacts
pub const ARTIFACTS_DIR: &str = "ARTIFACTS_DIR";

/// First pre-funded account of the Hardhat and Anvil development chains. Never holds real funds.
const DEV_ACCOUNT_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to get EVM network: {0}")]
    FailedToGetEvmNetwork(String),
    #[error("No deployer key configured for network {0}, set {DEPLOYER_PRIVATE_KEY}")]
    MissingPrivateKey(String),
    #[error("Invalid deployer private key: {0}")]
    InvalidPrivateKey(String),
}

/// Select the EVM network by name.
///
/// `hardhat` and `localhost` need no configuration. `custom` is read from the `RPC_URL`
/// environment variable, falling back to the value present at build time.
pub fn get_evm_network(name: &str) -> Result<Network, Error> {
    match name {
        "hardhat" => Ok(Network::Hardhat),
        "localhost" => Ok(Network::Localhost),
        "custom" => get_evm_network_from_env(),
        other => Err(Error::FailedToGetEvmNetwork(format!(
            "Unknown network {other:?}, expected one of \"hardhat\", \"localhost\" or \"custom\""
        ))),
    }
}

fn get_evm_network_from_env() -> Result<Network, Error> {
    let rpc_url = env::var(RPC_URL)
        .ok()
        .or_else(|| RPC_URL_BUILD_TIME_VAL.map(|s| s.to_string()));

    match rpc_url {
        Some(rpc_url) => {
            info!("Using custom EVM network at {rpc_url}");
            Network::new_custom(&rpc_url)
        }
        None => {
            error!("Failed to obtain the custom EVM network through environment variables");
            Err(Error::FailedToGetEvmNetwork(format!(
                "A custom network requires the {RPC_URL} environment variable"
            )))
        }
    }
}

/// The account deployments are sent from.
///
/// Taken from `DEPLOYER_PRIVATE_KEY`. Development networks fall back to their first
/// pre-funded account. The ephemeral `hardhat` chain only funds its development accounts, so
/// it always uses the first of them.
pub fn deployer_signer(network: &Network) -> Result<PrivateKeySigner, Error> {
    if *network == Network::Hardhat {
        if env::var(DEPLOYER_PRIVATE_KEY).is_ok() {
            warn!("Ignoring {DEPLOYER_PRIVATE_KEY} on the hardhat network");
        }
        return parse_signer(DEV_ACCOUNT_PRIVATE_KEY);
    }

    match env::var(DEPLOYER_PRIVATE_KEY) {
        Ok(key) => parse_signer(&key),
        Err(_) if network.is_local() => {
            debug!("No {DEPLOYER_PRIVATE_KEY} set, using the development account");
            parse_signer(DEV_ACCOUNT_PRIVATE_KEY)
        }
        Err(_) => Err(Error::MissingPrivateKey(network.to_string())),
    }
}

/// Parse a hex encoded secp256k1 private key, with or without `0x` prefix.
pub fn parse_signer(private_key: &str) -> Result<PrivateKeySigner, Error> {
    PrivateKeySigner::from_str(private_key.trim())
        .map_err(|err| Error::InvalidPrivateKey(err.to_string()))
}

/// HTTP provider that fills in gas, nonce and chain id and signs with `signer`.
pub fn deployer_provider(
    rpc_url: reqwest::Url,
    signer: PrivateKeySigner,
) -> impl Provider<Ethereum> + Clone {
    ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(rpc_url)
}

/// Deployer that sends from `signer` over HTTP and resolves artifacts from `artifacts`.
pub fn http_deployer(
    rpc_url: reqwest::Url,
    signer: PrivateKeySigner,
    artifacts: ArtifactStore,
    transaction_config: TransactionConfig,
) -> EvmDeployer<impl Provider<Ethereum> + Clone, Ethereum> {
    info!(
        "Deploying from {} via {rpc_url}, artifacts in {}",
        signer.address(),
        artifacts.root().display()
    );
    EvmDeployer::new(
        deployer_provider(rpc_url, signer),
        artifacts,
        transaction_config,
    )
}
