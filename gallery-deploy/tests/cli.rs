// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use assert_cmd::Command;
use std::process::Output;

/// Runs the binary with logs on stderr and a clean deployment environment.
fn deploy(args: &[&str]) -> Output {
    Command::cargo_bin("chain-gallery-deploy")
        .expect("binary is built")
        .env_remove("HARDHAT_NETWORK")
        .env_remove("RPC_URL")
        .env_remove("DEPLOYER_PRIVATE_KEY")
        .env_remove("ARTIFACTS_DIR")
        .args(["--log-output-dest", "stderr"])
        .args(args)
        .output()
        .expect("binary runs")
}

fn assert_failed_quietly(output: &Output, message: &str) {
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
    assert!(output.stdout.is_empty(), "stdout: {:?}", output.stdout);
    assert!(stderr.contains(message), "stderr: {stderr}");
}

#[test]
fn missing_artifact_exits_with_one_and_prints_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("missing");

    let output = deploy(&[
        "--network",
        "localhost",
        "--artifacts",
        missing.to_str().expect("utf8 path"),
    ]);

    assert_failed_quietly(&output, "Artifact for ChainGallery not found");
}

#[test]
fn unknown_network_exits_with_one() {
    let output = deploy(&["--network", "moon"]);

    assert_failed_quietly(&output, "Unknown network \"moon\"");
}

#[test]
fn custom_network_without_rpc_url_exits_with_one() {
    let output = deploy(&["--network", "custom"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_option_value_exits_with_one() {
    let output = deploy(&["--network", "localhost", "--max-fee-per-gas", "cheap"]);

    assert_failed_quietly(&output, "Invalid command line options");
}

#[test]
fn help_is_not_a_failure() {
    let output = deploy(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--network"));
}
