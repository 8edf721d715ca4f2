// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::artifact::ContractArtifact;
use crate::common::Bytecode;
use crate::error::DeploymentError;
use std::sync::Arc;

/// A handle capable of deploying new instances of one contract artifact.
#[derive(Clone, Debug, PartialEq)]
pub struct ContractFactory {
    artifact: Arc<ContractArtifact>,
}

impl ContractFactory {
    /// Checks that the artifact can be deployed as-is.
    pub fn new(artifact: ContractArtifact) -> Result<Self, DeploymentError> {
        let name = artifact.contract_name.clone();

        if !artifact.unlinked_libraries.is_empty() {
            warn!(
                "{name} needs libraries linked before deployment: {:?}",
                artifact.unlinked_libraries
            );
            return Err(DeploymentError::UnlinkedLibraries(name));
        }

        if artifact.bytecode.is_empty() {
            return Err(DeploymentError::EmptyBytecode(name));
        }

        // Deployments are made without constructor arguments.
        if let Some(constructor) = &artifact.abi.constructor {
            if !constructor.inputs.is_empty() {
                return Err(DeploymentError::ConstructorArguments {
                    name,
                    expected: constructor.inputs.len(),
                });
            }
        }

        Ok(Self {
            artifact: Arc::new(artifact),
        })
    }

    pub fn contract_name(&self) -> &str {
        &self.artifact.contract_name
    }

    pub fn artifact(&self) -> &Arc<ContractArtifact> {
        &self.artifact
    }

    /// The input of the contract creation transaction.
    pub fn deploy_code(&self) -> Bytecode {
        self.artifact.bytecode.clone()
    }
}
