use ethers_core::types::{Address, U256};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainIdentity {
    pub name: String,
    pub chain_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBalance {
    pub address: Address,
    pub balance_wei: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    pub number: u64,
    /// Only present on fee-market chains.
    pub base_fee_per_gas: Option<U256>,
}

/// Fee figures for the next block. Either the fee-market fields or the legacy
/// gas price are set, never both.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FeeEstimate {
    pub max_fee_per_gas: Option<U256>,
    pub max_priority_fee_per_gas: Option<U256>,
    pub legacy_gas_price: Option<U256>,
}

impl FeeEstimate {
    pub fn market(max_fee_per_gas: Option<U256>, max_priority_fee_per_gas: Option<U256>) -> Self {
        Self {
            max_fee_per_gas,
            max_priority_fee_per_gas,
            legacy_gas_price: None,
        }
    }

    pub fn legacy(gas_price: U256) -> Self {
        Self {
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
            legacy_gas_price: Some(gas_price),
        }
    }

    pub fn has_fee_market(&self) -> bool {
        self.max_fee_per_gas.is_some() || self.max_priority_fee_per_gas.is_some()
    }
}

/// Which fee lines a status report prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeMode {
    Market {
        base_fee: Option<U256>,
        max_fee: Option<U256>,
        priority_fee: Option<U256>,
    },
    Legacy,
}

impl FeeMode {
    /// Fee-market data wins whenever any of its figures is present.
    pub fn select(block: &BlockSummary, fees: &FeeEstimate) -> Self {
        if fees.has_fee_market() || block.base_fee_per_gas.is_some() {
            FeeMode::Market {
                base_fee: block.base_fee_per_gas,
                max_fee: fees.max_fee_per_gas,
                priority_fee: fees.max_priority_fee_per_gas,
            }
        } else {
            FeeMode::Legacy
        }
    }
}
