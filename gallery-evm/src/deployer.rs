// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::artifact::ArtifactStore;
use crate::deployment::DeploymentHandle;
use crate::error::DeploymentError;
use crate::factory::ContractFactory;
use crate::transaction_config::TransactionConfig;
use crate::{short_address, TX_TIMEOUT};
use alloy::eips::eip1559::Eip1559Estimation;
use alloy::network::{Network, ReceiptResponse, TransactionBuilder};
use alloy::providers::{PendingTransactionBuilder, Provider};
use async_trait::async_trait;
use std::marker::PhantomData;

/// The services a deployment is carried out with: artifact resolution, submission of the
/// creation transaction and the wait for its confirmation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    /// Resolve the named contract artifact to a deployable factory.
    fn contract_factory(&self, contract_name: &str) -> Result<ContractFactory, DeploymentError>;

    /// Submit the creation transaction for a new instance. Does not wait for confirmation.
    async fn deploy(&self, factory: ContractFactory) -> Result<DeploymentHandle, DeploymentError>;

    /// Suspend until the deployment is confirmed and return the resolved handle.
    async fn deployed(
        &self,
        handle: DeploymentHandle,
    ) -> Result<DeploymentHandle, DeploymentError>;
}

/// Deploys contracts through an alloy provider. The provider is expected to sign transactions.
pub struct EvmDeployer<P: Provider<N>, N: Network> {
    provider: P,
    artifacts: ArtifactStore,
    transaction_config: TransactionConfig,
    _network: PhantomData<N>,
}

impl<P, N> EvmDeployer<P, N>
where
    P: Provider<N>,
    N: Network,
{
    pub fn new(provider: P, artifacts: ArtifactStore, transaction_config: TransactionConfig) -> Self {
        Self {
            provider,
            artifacts,
            transaction_config,
            _network: PhantomData,
        }
    }

    /// Fees to pin on the creation transaction, or `None` to leave them to the fillers.
    async fn deployment_fees(&self) -> Result<Option<Eip1559Estimation>, DeploymentError> {
        let max_fee_per_gas = self.transaction_config.max_fee_per_gas;
        if !max_fee_per_gas.needs_market_estimate() {
            return Ok(None);
        }

        let market = self.provider.estimate_eip1559_fees().await?;
        Ok(max_fee_per_gas.apply(market))
    }
}

/// The creation transaction for `factory`, with `fees` pinned when given.
fn deployment_request<N: Network>(
    factory: &ContractFactory,
    fees: Option<Eip1559Estimation>,
) -> N::TransactionRequest {
    let mut transaction_request =
        N::TransactionRequest::default().with_deploy_code(factory.deploy_code());

    if let Some(fees) = fees {
        debug!("Using fees {fees:?} for deployment of {}", factory.contract_name());
        transaction_request.set_max_fee_per_gas(fees.max_fee_per_gas);
        transaction_request.set_max_priority_fee_per_gas(fees.max_priority_fee_per_gas);
    }

    transaction_request
}

/// Resolve `handle` from the receipt of its creation transaction.
fn resolve_from_receipt<R: ReceiptResponse>(
    handle: DeploymentHandle,
    receipt: &R,
) -> Result<DeploymentHandle, DeploymentError> {
    let tx_hash = handle.tx_hash();

    if !receipt.status() {
        error!(
            "Deployment of {} reverted in transaction {tx_hash:?}",
            handle.contract_name()
        );
        return Err(DeploymentError::DeploymentReverted(tx_hash));
    }

    let address = receipt
        .contract_address()
        .ok_or(DeploymentError::MissingContractAddress(tx_hash))?;

    debug!(
        "{} deployment with tx_hash {tx_hash:?} confirmed at {}",
        handle.contract_name(),
        short_address(&address)
    );

    Ok(handle.resolve(address, receipt.block_number()))
}

#[async_trait]
impl<P, N> ContractDeployer for EvmDeployer<P, N>
where
    P: Provider<N>,
    N: Network,
{
    fn contract_factory(&self, contract_name: &str) -> Result<ContractFactory, DeploymentError> {
        let artifact = self.artifacts.resolve(contract_name)?;
        ContractFactory::new(artifact)
    }

    async fn deploy(&self, factory: ContractFactory) -> Result<DeploymentHandle, DeploymentError> {
        let fees = self.deployment_fees().await?;
        let transaction_request = deployment_request::<N>(&factory, fees);

        let pending_tx_builder = self
            .provider
            .send_transaction(transaction_request)
            .await
            .inspect_err(|err| {
                error!(
                    "Failed to send deployment transaction for {}: {err:?}",
                    factory.contract_name()
                )
            })?;

        let tx_hash = *pending_tx_builder.tx_hash();
        debug!(
            "{} deployment transaction is pending with tx_hash: {tx_hash:?}",
            factory.contract_name()
        );

        Ok(DeploymentHandle::pending(factory.artifact().clone(), tx_hash))
    }

    async fn deployed(
        &self,
        handle: DeploymentHandle,
    ) -> Result<DeploymentHandle, DeploymentError> {
        let tx_hash = handle.tx_hash();

        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .with_required_confirmations(self.transaction_config.required_confirmations)
            .with_timeout(Some(TX_TIMEOUT))
            .get_receipt()
            .await
            .inspect_err(|err| {
                error!("Failed to confirm deployment transaction {tx_hash:?}: {err:?}")
            })?;

        resolve_from_receipt(handle, &receipt)
    }
}
