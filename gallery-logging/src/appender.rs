// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::error::Result;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};

const LOG_FILE_NAME: &str = "chain-gallery-deploy.log";

/// Non-blocking writer to a log file inside `dir`, which is created if needed.
///
/// The guard must be held for as long as logs are written, dropping it flushes the writer.
pub(crate) fn file_rotater(dir: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;
    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    Ok(tracing_appender::non_blocking(file_appender))
}
