// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Compiled contract artifacts, as written by Hardhat (`artifacts/`) or Foundry (`out/`).

use crate::common::Bytecode;
use crate::error::DeploymentError;
use alloy::json_abi::JsonAbi;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

/// Directory searched for artifacts when none is configured.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Marker the compiler leaves in creation code for every library that still has to be linked.
const LINK_PLACEHOLDER_MARKER: &str = "__";

type LinkReferences = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactFile {
    contract_name: Option<String>,
    source_name: Option<String>,
    abi: JsonAbi,
    bytecode: RawBytecode,
    #[serde(default)]
    link_references: LinkReferences,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    /// Hardhat keeps the creation code as a plain hex string.
    Hex(String),
    /// Foundry wraps it in an object together with its link references.
    Object {
        object: String,
        #[serde(default, rename = "linkReferences")]
        link_references: LinkReferences,
    },
}

/// A named, pre-compiled deployable unit.
#[derive(Clone, Debug, PartialEq)]
pub struct ContractArtifact {
    pub contract_name: String,
    /// Source file the contract was compiled from, empty when unknown.
    pub source_name: String,
    pub abi: JsonAbi,
    /// Creation code. Empty when the artifact still has unlinked libraries.
    pub bytecode: Bytecode,
    /// Libraries referenced by placeholders in the creation code.
    pub unlinked_libraries: Vec<String>,
}

impl ContractArtifact {
    /// Parse an artifact document.
    ///
    /// Foundry artifacts carry neither the contract nor the source name, so the caller provides
    /// the values derived from the artifact path.
    pub fn from_json(
        json: &str,
        fallback_contract_name: &str,
        fallback_source_name: &str,
    ) -> Result<Self, String> {
        let file: ArtifactFile = serde_json::from_str(json).map_err(|err| err.to_string())?;

        let (hex, mut link_references) = match file.bytecode {
            RawBytecode::Hex(hex) => (hex, LinkReferences::new()),
            RawBytecode::Object {
                object,
                link_references,
            } => (object, link_references),
        };
        link_references.extend(file.link_references);

        let mut unlinked_libraries: Vec<String> = link_references
            .into_iter()
            .flat_map(|(source, libraries)| {
                libraries
                    .into_keys()
                    .map(move |library| format!("{source}:{library}"))
            })
            .collect();

        let bytecode = if hex.contains(LINK_PLACEHOLDER_MARKER) {
            if unlinked_libraries.is_empty() {
                unlinked_libraries.push("<unknown>".to_string());
            }
            Bytecode::new()
        } else {
            unlinked_libraries.clear();
            Bytecode::from_str(hex.trim()).map_err(|err| format!("invalid bytecode: {err}"))?
        };

        Ok(Self {
            contract_name: file
                .contract_name
                .unwrap_or_else(|| fallback_contract_name.to_string()),
            source_name: file
                .source_name
                .unwrap_or_else(|| fallback_source_name.to_string()),
            abi: file.abi,
            bytecode,
            unlinked_libraries,
        })
    }

    /// Read and parse the artifact at `path`.
    pub fn from_file(path: &Path) -> Result<Self, DeploymentError> {
        let invalid = |reason: String| DeploymentError::InvalidArtifact {
            path: path.to_path_buf(),
            reason,
        };

        let json = std::fs::read_to_string(path).map_err(|err| invalid(err.to_string()))?;
        let contract_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source_name = path
            .parent()
            .and_then(Path::file_name)
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::from_json(&json, &contract_name, &source_name).map_err(invalid)
    }

    /// `<source>:<contract>`, the name that is unique across a project.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Whether the artifact was compiled from `source`.
    ///
    /// Foundry only records the file name of the source, so a bare file name matches any path
    /// ending in it.
    fn is_compiled_from(&self, source: &str) -> bool {
        if self.source_name == source {
            return true;
        }
        if self.source_name.contains('/') {
            return false;
        }
        Path::new(source).file_name().and_then(|name| name.to_str())
            == Some(self.source_name.as_str())
    }
}

/// Looks up contract artifacts by name below a root directory.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACTS_DIR)
    }
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a contract name to its artifact.
    ///
    /// `name` is either a bare contract name (`ChainGallery`) or a fully qualified one
    /// (`contracts/ChainGallery.sol:ChainGallery`). A bare name must be unique in the store.
    pub fn resolve(&self, name: &str) -> Result<ContractArtifact, DeploymentError> {
        let (source, contract) = match name.rsplit_once(':') {
            Some((source, contract)) => (Some(source), contract),
            None => (None, name),
        };

        let not_found = || DeploymentError::ArtifactNotFound {
            name: name.to_string(),
            dir: self.root.clone(),
        };

        if !self.root.is_dir() {
            warn!("Artifacts directory {} does not exist", self.root.display());
            return Err(not_found());
        }

        let file_name = format!("{contract}.json");
        let mut candidates = Vec::new();

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name().to_str() != Some("build-info"));

        for entry in walker {
            let entry = entry.map_err(|err| DeploymentError::InvalidArtifact {
                path: err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                reason: err.to_string(),
            })?;

            // `<Name>.dbg.json` debug files never match the exact file name.
            if !entry.file_type().is_file()
                || entry.file_name().to_str() != Some(file_name.as_str())
            {
                continue;
            }

            let artifact = ContractArtifact::from_file(entry.path())?;
            if artifact.contract_name != contract {
                continue;
            }
            if let Some(source) = source {
                if !artifact.is_compiled_from(source) {
                    continue;
                }
            }

            debug!(
                "Found artifact for {} at {}",
                artifact.fully_qualified_name(),
                entry.path().display()
            );
            candidates.push(artifact);
        }

        match candidates.len() {
            0 => Err(not_found()),
            1 => Ok(candidates.remove(0)),
            _ => Err(DeploymentError::AmbiguousArtifact {
                name: name.to_string(),
                candidates: candidates
                    .iter()
                    .map(ContractArtifact::fully_qualified_name)
                    .collect(),
            }),
        }
    }
}
