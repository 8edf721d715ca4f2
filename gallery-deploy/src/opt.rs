// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::args::max_fee_per_gas::MaxFeePerGasParam;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use gallery_evm::utils::ARTIFACTS_DIR;
use gallery_logging::{LogFormat, LogOutputDest};
use std::ffi::OsString;
use std::path::PathBuf;

// Please do not remove the blank lines in these doc comments.
// They are used for inserting line breaks when the help menu is rendered in the UI.

/// Deploy the ChainGallery contract and print its address.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Opt {
    /// The directory holding the compiled contract artifacts.
    ///
    /// Both Hardhat (`artifacts/`) and Foundry (`out/`) layouts are supported.
    #[clap(long, env = ARTIFACTS_DIR, default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Specify the logging format.
    ///
    /// Valid values are "default" or "json".
    ///
    /// If the argument is not used, the default format will be applied.
    #[clap(long, value_parser = LogFormat::parse_from_str, verbatim_doc_comment)]
    pub log_format: Option<LogFormat>,

    /// Specify the logging output destination.
    ///
    /// Valid values are "stderr", "stdout", "data-dir", or a custom path.
    ///
    /// `data-dir` is the default value.
    ///
    /// The data directory location is platform specific:
    ///  - Linux: $HOME/.local/share/chain-gallery/deploy/logs
    ///  - macOS: $HOME/Library/Application Support/chain-gallery/deploy/logs
    ///  - Windows: C:\Users\<username>\AppData\Roaming\chain-gallery\deploy\logs
    #[allow(rustdoc::invalid_html_tags)]
    #[clap(long, value_parser = LogOutputDest::parse_from_str, verbatim_doc_comment, default_value = "data-dir"
    )]
    pub log_output_dest: LogOutputDest,

    /// The maximum fee per gas the deployment transaction may pay.
    ///
    /// Valid values are:
    ///  - auto: use the market price (default)
    ///  - limited-auto:<WEI AMOUNT>: use the market price, capped at the given amount
    ///  - unlimited: no cap at all
    ///  - <WEI AMOUNT>: a fixed fee
    #[allow(rustdoc::invalid_html_tags)]
    #[clap(long, verbatim_doc_comment)]
    pub max_fee_per_gas: Option<MaxFeePerGasParam>,

    /// The network to deploy to.
    ///
    /// Valid values are:
    ///  - hardhat: a throwaway local node started for this deployment (default)
    ///  - localhost: a development node already listening on http://localhost:8545
    ///  - custom: the node at the RPC_URL environment variable, paying with DEPLOYER_PRIVATE_KEY
    #[clap(long, env = "HARDHAT_NETWORK", default_value = "hardhat", verbatim_doc_comment)]
    pub network: String,
}

impl Opt {
    /// Parse the options, reporting invalid ones as an error rather than exiting.
    ///
    /// Help and version requests still print and exit straight away.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(opt) => Ok(opt),
            Err(err) if !err.use_stderr() => err.exit(),
            Err(err) => Err(err).wrap_err("Invalid command line options"),
        }
    }
}
