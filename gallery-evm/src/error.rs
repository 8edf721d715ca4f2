// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::TxHash;
use alloy::transports::{RpcError, TransportErrorKind};
use std::path::PathBuf;

/// Any failure while resolving, submitting or confirming a contract deployment.
#[derive(thiserror::Error, Debug)]
pub enum DeploymentError {
    #[error("Artifact for {name} not found in {}", dir.display())]
    ArtifactNotFound { name: String, dir: PathBuf },
    #[error("There are multiple artifacts for contract {name}, use one of the fully qualified names: {}", candidates.join(", "))]
    AmbiguousArtifact {
        name: String,
        candidates: Vec<String>,
    },
    #[error("Invalid artifact {}: {reason}", path.display())]
    InvalidArtifact { path: PathBuf, reason: String },
    #[error("Contract {0} has no creation bytecode, it may be abstract or an interface")]
    EmptyBytecode(String),
    #[error("Contract {0} references libraries that have not been linked")]
    UnlinkedLibraries(String),
    #[error("Contract {name} expects {expected} constructor argument(s)")]
    ConstructorArguments { name: String, expected: usize },
    #[error(transparent)]
    Rpc(#[from] RpcError<TransportErrorKind>),
    #[error(transparent)]
    PendingTransaction(#[from] alloy::providers::PendingTransactionError),
    #[error("Deployment transaction {0} was reverted")]
    DeploymentReverted(TxHash),
    #[error("Receipt of deployment transaction {0} carries no contract address")]
    MissingContractAddress(TxHash),
    #[error("Failed to write deployment result: {0}")]
    Output(#[from] std::io::Error),
}
