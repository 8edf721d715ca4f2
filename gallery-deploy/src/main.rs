// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

#[macro_use]
extern crate tracing;

mod args;
mod opt;

use crate::args::max_fee_per_gas::get_max_fee_per_gas_from_opt_param;
use crate::opt::Opt;
use color_eyre::eyre::{eyre, Result, WrapErr};
use gallery_evm::artifact::ArtifactStore;
use gallery_evm::testnet::Testnet;
use gallery_evm::transaction_config::TransactionConfig;
use gallery_evm::utils::{deployer_signer, get_evm_network, http_deployer};
use gallery_evm::Network;
use gallery_logging::{Level, LogBuilder, LogFormat, WorkerGuard};

/// The contract artifact this binary deploys.
const CONTRACT_NAME: &str = "ChainGallery";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let opt = Opt::try_parse_args(std::env::args_os())?;

    let _log_guard = init_logging(&opt)?;
    info!("\"{}\"", std::env::args().collect::<Vec<_>>().join(" "));
    let selected = get_evm_network(&opt.network)
        .wrap_err_with(|| format!("Failed to select the {:?} network", opt.network))?;
    info!("Deploying {CONTRACT_NAME} to the {selected} network");

    // The node backing the `hardhat` network only lives until the end of `main`.
    let testnet = if selected == Network::Hardhat {
        Some(Testnet::new().wrap_err("Failed to start the hardhat network")?)
    } else {
        None
    };
    let (network, signer) = match &testnet {
        Some(testnet) => (testnet.to_network(), testnet.default_signer()),
        None => (selected.clone(), deployer_signer(&selected)?),
    };

    let rpc_url = network
        .rpc_url()
        .ok_or_else(|| eyre!("The {network} network has no RPC endpoint"))?
        .clone();

    let transaction_config = TransactionConfig {
        max_fee_per_gas: get_max_fee_per_gas_from_opt_param(opt.max_fee_per_gas),
        ..Default::default()
    };
    let deployer = http_deployer(
        rpc_url,
        signer,
        ArtifactStore::new(&opt.artifacts),
        transaction_config,
    );

    gallery_evm::run(&deployer, CONTRACT_NAME, &mut std::io::stdout())
        .await
        .inspect_err(|err| error!("Deployment of {CONTRACT_NAME} failed: {err}"))?;

    Ok(())
}

fn init_logging(opt: &Opt) -> Result<Option<WorkerGuard>> {
    let logging_targets = vec![
        ("gallery_deploy".to_string(), Level::TRACE),
        ("gallery_evm".to_string(), Level::TRACE),
        ("gallery_logging".to_string(), Level::INFO),
    ];
    let mut log_builder = LogBuilder::new(logging_targets);
    log_builder.output_dest(opt.log_output_dest.clone());
    log_builder.format(opt.log_format.unwrap_or(LogFormat::Default));
    let guard = log_builder.initialize()?;
    Ok(guard)
}
