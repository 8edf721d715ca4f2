// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use alloy::eips::eip1559::Eip1559Estimation;

/// Number of blocks a deployment must be buried under before it counts as confirmed.
pub const DEFAULT_REQUIRED_CONFIRMATIONS: u64 = 1;

#[derive(Clone, Debug)]
pub struct TransactionConfig {
    pub max_fee_per_gas: MaxFeePerGas,
    pub required_confirmations: u64,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            max_fee_per_gas: MaxFeePerGas::default(),
            required_confirmations: DEFAULT_REQUIRED_CONFIRMATIONS,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MaxFeePerGas {
    /// Use the current market price for fee per gas. WARNING: This can result in unexpected high gas fees!
    #[default]
    Auto,
    /// Use the current market price for fee per gas, but with an upper limit.
    LimitedAuto(u128),
    /// Use no max fee per gas. WARNING: This can result in unexpected high gas fees!
    Unlimited,
    /// Use a custom max fee per gas in WEI.
    Custom(u128),
}

impl MaxFeePerGas {
    /// Whether fees have to be fixed on the transaction rather than left to the provider fillers.
    pub fn needs_market_estimate(&self) -> bool {
        matches!(self, MaxFeePerGas::LimitedAuto(_) | MaxFeePerGas::Custom(_))
    }

    /// Fees to set on the transaction, given the current market estimate.
    ///
    /// Returns `None` when the fillers should decide. The priority fee never exceeds the max fee.
    pub fn apply(&self, market: Eip1559Estimation) -> Option<Eip1559Estimation> {
        let max_fee_per_gas = match *self {
            MaxFeePerGas::Auto | MaxFeePerGas::Unlimited => return None,
            MaxFeePerGas::LimitedAuto(limit) => market.max_fee_per_gas.min(limit),
            MaxFeePerGas::Custom(fee) => fee,
        };

        Some(Eip1559Estimation {
            max_fee_per_gas,
            max_priority_fee_per_gas: market.max_priority_fee_per_gas.min(max_fee_per_gas),
        })
    }
}
