// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use alloy::network::Ethereum;
use alloy::primitives::address;
use alloy::providers::Provider;
use gallery_evm::artifact::ArtifactStore;
use gallery_evm::testnet::Testnet;
use gallery_evm::transaction_config::TransactionConfig;
use gallery_evm::utils::{deployer_provider, parse_signer};
use gallery_evm::{run, ContractDeployer, DeploymentError, EvmDeployer};
use std::path::PathBuf;

const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn fixture_artifacts() -> ArtifactStore {
    ArtifactStore::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/artifacts"))
}

#[test]
fn factory_is_resolved_from_hardhat_artifacts() {
    // Nothing is sent, so the endpoint does not have to exist.
    let provider = deployer_provider(
        "http://localhost:1".parse().expect("valid url"),
        parse_signer(DEV_KEY).expect("valid key"),
    );
    let deployer =
        EvmDeployer::<_, Ethereum>::new(provider, fixture_artifacts(), TransactionConfig::default());

    let factory = deployer
        .contract_factory("ChainGallery")
        .expect("fixture artifact resolves");
    assert_eq!(factory.contract_name(), "ChainGallery");
    assert_eq!(
        factory.artifact().fully_qualified_name(),
        "contracts/ChainGallery.sol:ChainGallery"
    );

    let err = deployer
        .contract_factory("Unknown")
        .expect_err("not in the fixture");
    assert!(matches!(err, DeploymentError::ArtifactNotFound { .. }));
}

#[tokio::test]
#[ignore = "requires the anvil binary, install it with foundryup"]
async fn deploys_to_local_node_and_prints_address() {
    let testnet = Testnet::new().expect("anvil starts");
    let provider = deployer_provider(testnet.rpc_url().clone(), testnet.default_signer());
    let deployer = EvmDeployer::<_, Ethereum>::new(
        provider.clone(),
        fixture_artifacts(),
        TransactionConfig::default(),
    );

    let mut out = Vec::new();
    let handle = run(&deployer, "ChainGallery", &mut out)
        .await
        .expect("deployment succeeds");

    // First contract created by the first development account.
    let expected = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
    assert_eq!(handle.address(), Some(expected));
    assert_eq!(
        String::from_utf8(out).expect("utf8 output"),
        format!("ChainGallery contract deployed to: {expected}\n")
    );

    let code = provider
        .get_code_at(expected)
        .await
        .expect("code is readable");
    assert_eq!(code.to_vec(), vec![0x00]);

    // Every invocation creates a new instance.
    let mut out = Vec::new();
    let second = run(&deployer, "ChainGallery", &mut out)
        .await
        .expect("second deployment succeeds");
    assert_ne!(second.address(), handle.address());
}
