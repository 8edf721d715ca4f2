// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::deployer::ContractDeployer;
use crate::deployment::DeploymentHandle;
use crate::error::DeploymentError;
use std::io::Write;

/// Printed between the contract name and its address once a deployment is confirmed.
pub const DEPLOYED_LABEL: &str = "contract deployed to:";

/// Deploy one instance of `contract_name` and report its address on `out`.
///
/// Nothing is written to `out` unless the deployment has been confirmed. A single attempt is
/// made; any failure is returned to the caller.
pub async fn run<D, W>(
    deployer: &D,
    contract_name: &str,
    out: &mut W,
) -> Result<DeploymentHandle, DeploymentError>
where
    D: ContractDeployer + ?Sized,
    W: Write,
{
    let factory = deployer.contract_factory(contract_name)?;
    debug!(
        "Resolved {contract_name} to {}",
        factory.artifact().fully_qualified_name()
    );

    let handle = deployer.deploy(factory).await?;
    info!(
        "Waiting for {contract_name} deployment transaction {:?} to be confirmed",
        handle.tx_hash()
    );

    let handle = deployer.deployed(handle).await?;
    let address = handle
        .address()
        .ok_or_else(|| DeploymentError::MissingContractAddress(handle.tx_hash()))?;

    writeln!(out, "{contract_name} {DEPLOYED_LABEL} {address}")?;
    out.flush()?;

    info!(
        "{contract_name} deployed to {address} in block {:?}",
        handle.block_number()
    );
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ContractArtifact;
    use crate::common::{Address, Bytecode, TxHash};
    use crate::deployer::MockContractDeployer;
    use crate::factory::ContractFactory;
    use alloy::json_abi::JsonAbi;
    use alloy::primitives::{address, b256};
    use std::io;
    use std::sync::{Arc, Mutex};

    const CONTRACT: &str = "ChainGallery";
    const DEPLOYED_AT: Address = address!("abcdef0123456789abcdef0123456789abcdef01");
    const TX_HASH: TxHash =
        b256!("2222222222222222222222222222222222222222222222222222222222222222");

    /// Captures everything written, shared with the mock expectations.
    #[derive(Clone, Default)]
    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn output(&self) -> String {
            let buffer = self.buffer.lock().expect("Failed to acquire buffer lock");
            String::from_utf8(buffer.clone()).expect("Buffer contains invalid UTF-8")
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer
                .lock()
                .expect("Failed to acquire buffer lock")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn factory() -> ContractFactory {
        ContractFactory::new(ContractArtifact {
            contract_name: CONTRACT.to_string(),
            source_name: "contracts/ChainGallery.sol".to_string(),
            abi: JsonAbi::new(),
            bytecode: Bytecode::from_static(&[0x60, 0x00]),
            unlinked_libraries: vec![],
        })
        .expect("deployable artifact")
    }

    fn resolving_factory(deployer: &mut MockContractDeployer) {
        deployer
            .expect_contract_factory()
            .withf(|name| name.to_string() == CONTRACT)
            .times(1)
            .returning(|_| Ok(factory()));
    }

    fn submitting_once(deployer: &mut MockContractDeployer) {
        deployer
            .expect_deploy()
            .times(1)
            .returning(|factory| Ok(DeploymentHandle::pending(factory.artifact().clone(), TX_HASH)));
    }

    #[tokio::test]
    async fn prints_address_after_confirmation() {
        let mut deployer = MockContractDeployer::new();
        resolving_factory(&mut deployer);
        submitting_once(&mut deployer);

        let out = TestWriter::default();
        let probe = out.clone();
        deployer
            .expect_deployed()
            .times(1)
            .returning(move |handle| {
                assert!(
                    probe.output().is_empty(),
                    "nothing may be printed before the deployment is confirmed"
                );
                Ok(handle.resolve(DEPLOYED_AT, Some(7)))
            });

        let mut writer = out.clone();
        let handle = run(&deployer, CONTRACT, &mut writer)
            .await
            .expect("deployment succeeds");

        assert_eq!(handle.address(), Some(DEPLOYED_AT));
        assert_eq!(
            out.output(),
            format!("ChainGallery contract deployed to: {DEPLOYED_AT}\n")
        );
        assert!(out
            .output()
            .to_lowercase()
            .starts_with("chaingallery contract deployed to: 0xabcdef0123456789abcdef0123456789abcdef01"));
    }

    #[tokio::test]
    async fn unknown_artifact_prints_nothing() {
        let mut deployer = MockContractDeployer::new();
        deployer
            .expect_contract_factory()
            .times(1)
            .returning(|name| {
                Err(DeploymentError::ArtifactNotFound {
                    name: name.to_string(),
                    dir: "artifacts".into(),
                })
            });
        deployer.expect_deploy().never();
        deployer.expect_deployed().never();

        let mut out = TestWriter::default();
        let err = run(&deployer, CONTRACT, &mut out)
            .await
            .expect_err("artifact is unknown");

        assert!(matches!(err, DeploymentError::ArtifactNotFound { .. }));
        assert!(out.output().is_empty());
    }

    #[tokio::test]
    async fn rejected_deployment_prints_nothing() {
        let mut deployer = MockContractDeployer::new();
        resolving_factory(&mut deployer);
        submitting_once(&mut deployer);
        deployer
            .expect_deployed()
            .times(1)
            .returning(|handle| Err(DeploymentError::DeploymentReverted(handle.tx_hash())));

        let mut out = TestWriter::default();
        let err = run(&deployer, CONTRACT, &mut out)
            .await
            .expect_err("deployment reverted");

        assert!(matches!(err, DeploymentError::DeploymentReverted(hash) if hash == TX_HASH));
        assert!(out.output().is_empty());
    }

    #[tokio::test]
    async fn failed_submission_is_not_retried() {
        let mut deployer = MockContractDeployer::new();
        resolving_factory(&mut deployer);
        deployer.expect_deploy().times(1).returning(|_| {
            Err(DeploymentError::Output(io::Error::other(
                "connection refused",
            )))
        });
        deployer.expect_deployed().never();

        let mut out = TestWriter::default();
        assert!(run(&deployer, CONTRACT, &mut out).await.is_err());
        assert!(out.output().is_empty());
    }

    #[tokio::test]
    async fn unresolved_handle_is_an_error() {
        let mut deployer = MockContractDeployer::new();
        resolving_factory(&mut deployer);
        submitting_once(&mut deployer);
        deployer
            .expect_deployed()
            .times(1)
            .returning(Ok);

        let mut out = TestWriter::default();
        let err = run(&deployer, CONTRACT, &mut out)
            .await
            .expect_err("handle has no address");

        assert!(matches!(err, DeploymentError::MissingContractAddress(_)));
        assert!(out.output().is_empty());
    }
}
