// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::Address;
use alloy::transports::http::reqwest;
use std::sync::LazyLock;

#[macro_use]
extern crate tracing;

pub mod artifact;
pub mod common;
pub mod deploy;
pub mod deployer;
pub mod deployment;
pub mod error;
pub mod factory;
pub mod testnet;
pub mod transaction_config;
pub mod utils;

pub use deploy::{run, DEPLOYED_LABEL};
pub use deployer::{ContractDeployer, EvmDeployer};
pub use deployment::DeploymentHandle;
pub use error::DeploymentError;
pub use factory::ContractFactory;

/// Upper bound on the wait for a deployment transaction to be confirmed.
const TX_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);

static LOCALHOST_HTTP_RPC_URL: LazyLock<reqwest::Url> = LazyLock::new(|| {
    "http://localhost:8545"
        .parse()
        .expect("Invalid RPC URL")
});

#[derive(Clone, Debug, PartialEq)]
pub struct CustomNetwork {
    pub rpc_url_http: reqwest::Url,
}

impl CustomNetwork {
    pub fn new(rpc_url: &str) -> Result<Self, utils::Error> {
        let rpc_url_http = reqwest::Url::parse(rpc_url).map_err(|err| {
            utils::Error::FailedToGetEvmNetwork(format!("Invalid RPC URL {rpc_url:?}: {err}"))
        })?;
        Ok(Self { rpc_url_http })
    }
}

/// The network a contract is deployed to.
///
/// `Hardhat` is an ephemeral development chain that only lives for the duration of the
/// deployment, `Localhost` is a development node that is already running on the default port.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Network {
    #[default]
    Hardhat,
    Localhost,
    Custom(CustomNetwork),
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl Network {
    pub fn new_custom(rpc_url: &str) -> Result<Self, utils::Error> {
        Ok(Self::Custom(CustomNetwork::new(rpc_url)?))
    }

    pub fn identifier(&self) -> &str {
        match self {
            Network::Hardhat => "hardhat",
            Network::Localhost => "localhost",
            Network::Custom(_) => "custom",
        }
    }

    /// Development networks come with pre-funded accounts.
    pub fn is_local(&self) -> bool {
        matches!(self, Network::Hardhat | Network::Localhost)
    }

    /// RPC endpoint of the network.
    ///
    /// `Hardhat` has no fixed endpoint, it is only known once the node has been spawned. Use
    /// [`testnet::Testnet::to_network`] to obtain a network that points at it.
    pub fn rpc_url(&self) -> Option<&reqwest::Url> {
        match self {
            Network::Hardhat => None,
            Network::Localhost => Some(&LOCALHOST_HTTP_RPC_URL),
            Network::Custom(custom) => Some(&custom.rpc_url_http),
        }
    }
}

/// Abbreviated form of an address for log lines.
pub fn short_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}..{}", &full[..6], &full[full.len() - 4..])
}
