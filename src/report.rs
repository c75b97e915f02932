use std::io::Write;

use anyhow::{Context, Result};
use ethers_core::types::U256;
use ethers_core::utils::to_checksum;

use crate::eth::ChainClient;
use crate::models::{AccountBalance, FeeMode};
use crate::units::UnitFormatter;

const NOT_AVAILABLE: &str = "n/a";

/// Writes the network status report.
///
/// All independent reads finish before the first line is written. Only the
/// legacy gas price query runs afterwards, so a failure there leaves the first
/// four lines in place.
pub async fn write_network_status<C, W>(
    client: &C,
    units: &dyn UnitFormatter,
    out: &mut W,
) -> Result<()>
where
    C: ChainClient,
    W: Write,
{
    let signer = client
        .signer_address()
        .await
        .context("failed to resolve signer account")?;
    let (network, balance_wei, block, fees) = tokio::try_join!(
        client.network(),
        client.balance(signer),
        client.latest_block(),
        client.fee_data()
    )?;
    let balance = AccountBalance {
        address: signer,
        balance_wei,
    };
    tracing::debug!(
        "fetched status for chain {} at block {}",
        network.chain_id,
        block.number
    );

    writeln!(out, "Network: {} chainId: {}", network.name, network.chain_id)?;
    writeln!(out, "Signer: {}", to_checksum(&balance.address, None))?;
    writeln!(out, "Balance (ETH): {}", units.format_ether(balance.balance_wei)?)?;
    writeln!(out, "Latest block: {}", block.number)?;

    match FeeMode::select(&block, &fees) {
        FeeMode::Market {
            base_fee,
            max_fee,
            priority_fee,
        } => {
            writeln!(out, "Base fee (gwei): {}", gwei_or_na(units, base_fee)?)?;
            writeln!(out, "Max fee (gwei): {}", gwei_or_na(units, max_fee)?)?;
            writeln!(out, "Priority fee (gwei): {}", gwei_or_na(units, priority_fee)?)?;
        }
        FeeMode::Legacy => {
            // Printed from its own query; `fees.legacy_gas_price` only marks the chain as legacy.
            let gas_price = client
                .gas_price()
                .await
                .context("failed to fetch legacy gas price")?;
            writeln!(out, "Legacy gas price (gwei): {}", units.format_gwei(gas_price)?)?;
        }
    }

    Ok(())
}

/// Writes one checksummed address per line.
pub async fn write_accounts<C, W>(client: &C, out: &mut W) -> Result<()>
where
    C: ChainClient,
    W: Write,
{
    let accounts = client.accounts().await?;
    tracing::debug!("{} signer account(s)", accounts.len());
    for account in accounts {
        writeln!(out, "{}", to_checksum(&account, None))?;
    }
    Ok(())
}

fn gwei_or_na(units: &dyn UnitFormatter, value: Option<U256>) -> Result<String> {
    match value {
        Some(v) => Ok(units.format_gwei(v)?),
        None => Ok(NOT_AVAILABLE.to_string()),
    }
}
