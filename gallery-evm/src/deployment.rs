// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::artifact::ContractArtifact;
use crate::common::{Address, BlockNumber, TxHash};
use std::sync::Arc;

/// An in-flight or completed contract deployment.
///
/// Created when the creation transaction is submitted and resolved once the network has
/// confirmed it.
#[derive(Clone, Debug, PartialEq)]
pub struct DeploymentHandle {
    artifact: Arc<ContractArtifact>,
    tx_hash: TxHash,
    deployed: Option<Deployed>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Deployed {
    address: Address,
    block_number: Option<BlockNumber>,
}

impl DeploymentHandle {
    /// A deployment whose transaction has been submitted but not yet confirmed.
    pub fn pending(artifact: Arc<ContractArtifact>, tx_hash: TxHash) -> Self {
        Self {
            artifact,
            tx_hash,
            deployed: None,
        }
    }

    /// Mark the deployment as confirmed at `address`.
    pub fn resolve(mut self, address: Address, block_number: Option<BlockNumber>) -> Self {
        self.deployed = Some(Deployed {
            address,
            block_number,
        });
        self
    }

    pub fn artifact(&self) -> &ContractArtifact {
        &self.artifact
    }

    pub fn contract_name(&self) -> &str {
        &self.artifact.contract_name
    }

    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// The contract address, once the deployment is confirmed.
    pub fn address(&self) -> Option<Address> {
        self.deployed.map(|deployed| deployed.address)
    }

    pub fn block_number(&self) -> Option<BlockNumber> {
        self.deployed.and_then(|deployed| deployed.block_number)
    }

    pub fn is_deployed(&self) -> bool {
        self.deployed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::json_abi::JsonAbi;
    use alloy::primitives::{address, b256};

    #[test]
    fn pending_handle_has_no_address_until_resolved() {
        let artifact = Arc::new(ContractArtifact {
            contract_name: "ChainGallery".to_string(),
            source_name: String::new(),
            abi: JsonAbi::new(),
            bytecode: Default::default(),
            unlinked_libraries: vec![],
        });
        let tx_hash = b256!("1111111111111111111111111111111111111111111111111111111111111111");
        let handle = DeploymentHandle::pending(artifact, tx_hash);

        assert!(!handle.is_deployed());
        assert_eq!(handle.address(), None);
        assert_eq!(handle.contract_name(), "ChainGallery");

        let contract = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        let handle = handle.resolve(contract, Some(1));

        assert!(handle.is_deployed());
        assert_eq!(handle.address(), Some(contract));
        assert_eq!(handle.block_number(), Some(1));
        assert_eq!(handle.tx_hash(), tx_hash);
    }
}
