// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::{CustomNetwork, Network};
use alloy::node_bindings::{Anvil, AnvilInstance};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Could not spawn Anvil node, install it by running `foundryup`: {0}")]
    Spawn(String),
    #[error("Invalid ANVIL_PORT: {0}")]
    InvalidPort(String),
    #[error("Invalid Anvil RPC URL: {0}")]
    InvalidUrl(String),
}

/// An ephemeral local chain. The node is killed when the `Testnet` is dropped.
pub struct Testnet {
    anvil: AnvilInstance,
    rpc_url: Url,
}

impl Testnet {
    /// Starts an Anvil node with the usual pre-funded development accounts.
    pub fn new() -> Result<Self, Error> {
        let (anvil, rpc_url) = start_node()?;
        info!("Started local EVM node at {rpc_url}");
        Ok(Testnet { anvil, rpc_url })
    }

    pub fn to_network(&self) -> Network {
        Network::Custom(CustomNetwork {
            rpc_url_http: self.rpc_url.clone(),
        })
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Signer for the first default Anvil account (Alice).
    pub fn default_signer(&self) -> PrivateKeySigner {
        self.anvil.keys()[0].clone().into()
    }
}

/// Runs a local Anvil node bound to a specified IP address.
///
/// The `AnvilInstance` `endpoint` function is hardcoded to return "localhost", so we must also
/// return the RPC URL if we want to listen on a different address.
///
/// The `anvil` binary respects the `ANVIL_IP_ADDR` environment variable, but defaults to "localhost".
pub fn start_node() -> Result<(AnvilInstance, Url), Error> {
    let host = std::env::var("ANVIL_IP_ADDR").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("ANVIL_PORT")
        .unwrap_or(0.to_string())
        .parse::<u16>()
        .map_err(|err| Error::InvalidPort(err.to_string()))?;

    let anvil = Anvil::new()
        .port(port)
        .try_spawn()
        .map_err(|err| Error::Spawn(err.to_string()))?;

    // We have to manually return the RPC URL because the `anvil::endpoint_url()` always returns `localhost`
    let url = Url::parse(&format!("http://{host}:{}", anvil.port()))
        .map_err(|err| Error::InvalidUrl(err.to_string()))?;

    Ok((anvil, url))
}
