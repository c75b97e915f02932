use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{bail, Result};
use ethers_core::types::{Address, U256};
use ethers_core::utils::to_checksum;

use chain_inspect::eth::ChainClient;
use chain_inspect::models::{BlockSummary, ChainIdentity, FeeEstimate};
use chain_inspect::report::{write_accounts, write_network_status};
use chain_inspect::units::{NativeUnits, UnitFormatter, WrappedUnits};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Accounts,
    Network,
    Balance,
    LatestBlock,
    FeeData,
    GasPrice,
}

struct FakeChain {
    base_fee: Option<U256>,
    fees: FeeEstimate,
    gas_price: U256,
    fail_on: Option<Call>,
    gas_price_calls: AtomicUsize,
}

impl FakeChain {
    fn market() -> Self {
        Self {
            base_fee: Some(U256::from(12_345_678_901u64)),
            fees: FeeEstimate::market(
                Some(U256::from(26_691_357_802u64)),
                Some(U256::from(2_000_000_000u64)),
            ),
            gas_price: U256::from(14_000_000_000u64),
            fail_on: None,
            gas_price_calls: AtomicUsize::new(0),
        }
    }

    fn legacy() -> Self {
        Self {
            base_fee: None,
            fees: FeeEstimate::legacy(U256::from(3_100_000_000u64)),
            gas_price: U256::from(3_100_000_000u64),
            ..Self::market()
        }
    }

    fn failing_on(mut self, call: Call) -> Self {
        self.fail_on = Some(call);
        self
    }

    fn check(&self, call: Call) -> Result<()> {
        if self.fail_on == Some(call) {
            bail!("simulated RPC failure in {:?}", call);
        }
        Ok(())
    }
}

fn signer() -> Address {
    Address::from_low_u64_be(0xbeef)
}

impl ChainClient for FakeChain {
    async fn accounts(&self) -> Result<Vec<Address>> {
        self.check(Call::Accounts)?;
        Ok(vec![signer(), Address::from_low_u64_be(0xcafe)])
    }

    async fn network(&self) -> Result<ChainIdentity> {
        self.check(Call::Network)?;
        Ok(ChainIdentity {
            name: "sepolia".to_string(),
            chain_id: 11_155_111,
        })
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        self.check(Call::Balance)?;
        assert_eq!(address, signer());
        Ok(U256::from_dec_str("1500000000000000000").unwrap())
    }

    async fn latest_block(&self) -> Result<BlockSummary> {
        self.check(Call::LatestBlock)?;
        Ok(BlockSummary {
            number: 4_242_424,
            base_fee_per_gas: self.base_fee,
        })
    }

    async fn fee_data(&self) -> Result<FeeEstimate> {
        self.check(Call::FeeData)?;
        Ok(self.fees.clone())
    }

    async fn gas_price(&self) -> Result<U256> {
        self.gas_price_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Call::GasPrice)?;
        Ok(self.gas_price)
    }
}

async fn run(client: &FakeChain, units: &dyn UnitFormatter) -> (Result<()>, Vec<String>) {
    let mut out = Vec::new();
    let result = write_network_status(client, units, &mut out).await;
    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    (result, lines)
}

fn header() -> Vec<String> {
    vec![
        "Network: sepolia chainId: 11155111".to_string(),
        format!("Signer: {}", to_checksum(&signer(), None)),
        "Balance (ETH): 1.5".to_string(),
        "Latest block: 4242424".to_string(),
    ]
}

#[tokio::test]
async fn fee_market_chain_prints_three_figures() {
    let client = FakeChain::market();
    let (result, lines) = run(&client, &NativeUnits).await;
    result.unwrap();

    let mut expected = header();
    expected.extend([
        "Base fee (gwei): 12.35".to_string(),
        "Max fee (gwei): 26.69".to_string(),
        "Priority fee (gwei): 2.00".to_string(),
    ]);
    assert_eq!(lines, expected);
    assert_eq!(client.gas_price_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn absent_fee_figures_become_na() {
    let client = FakeChain {
        fees: FeeEstimate::default(),
        ..FakeChain::market()
    };
    let (result, lines) = run(&client, &NativeUnits).await;
    result.unwrap();

    assert_eq!(
        &lines[4..],
        [
            "Base fee (gwei): 12.35",
            "Max fee (gwei): n/a",
            "Priority fee (gwei): n/a",
        ]
    );
    assert_eq!(client.gas_price_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn priority_fee_without_base_fee_uses_fee_market_lines() {
    let client = FakeChain {
        base_fee: None,
        fees: FeeEstimate::market(None, Some(U256::from(1_500_000_000u64))),
        ..FakeChain::market()
    };
    let (result, lines) = run(&client, &NativeUnits).await;
    result.unwrap();

    assert_eq!(
        &lines[4..],
        [
            "Base fee (gwei): n/a",
            "Max fee (gwei): n/a",
            "Priority fee (gwei): 1.50",
        ]
    );
}

#[tokio::test]
async fn legacy_chain_queries_gas_price_once() {
    let client = FakeChain::legacy();
    let (result, lines) = run(&client, &NativeUnits).await;
    result.unwrap();

    let mut expected = header();
    expected.push("Legacy gas price (gwei): 3.10".to_string());
    assert_eq!(lines, expected);
    assert_eq!(client.gas_price_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn legacy_line_comes_from_the_gas_price_query() {
    let client = FakeChain {
        fees: FeeEstimate::legacy(U256::from(9_000_000_000u64)),
        gas_price: U256::from(4_560_000_000u64),
        ..FakeChain::legacy()
    };
    let (result, lines) = run(&client, &NativeUnits).await;
    result.unwrap();

    assert_eq!(lines.last().map(String::as_str), Some("Legacy gas price (gwei): 4.56"));
    assert_eq!(client.gas_price_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fee_market_ties_round_up() {
    let client = FakeChain {
        base_fee: Some(U256::from(125_000_000u64)),
        fees: FeeEstimate::market(
            Some(U256::from(1_250_000_000u64)),
            Some(U256::from(1_125_000_000u64)),
        ),
        ..FakeChain::market()
    };
    let (result, lines) = run(&client, &WrappedUnits).await;
    result.unwrap();

    assert_eq!(
        &lines[4..],
        [
            "Base fee (gwei): 0.13",
            "Max fee (gwei): 1.25",
            "Priority fee (gwei): 1.13",
        ]
    );
}

#[tokio::test]
async fn both_client_shapes_print_the_same_report() {
    for client in [FakeChain::market(), FakeChain::legacy()] {
        let (native, native_lines) = run(&client, &NativeUnits).await;
        let (wrapped, wrapped_lines) = run(&client, &WrappedUnits).await;
        native.unwrap();
        wrapped.unwrap();
        assert_eq!(native_lines, wrapped_lines);
    }
}

#[tokio::test]
async fn failed_read_prints_nothing() {
    for call in [
        Call::Accounts,
        Call::Network,
        Call::Balance,
        Call::LatestBlock,
        Call::FeeData,
    ] {
        let client = FakeChain::market().failing_on(call);
        let (result, lines) = run(&client, &NativeUnits).await;
        let err = result.unwrap_err();
        assert!(
            format!("{:#}", err).contains("simulated RPC failure"),
            "unexpected error for {:?}: {:#}",
            call,
            err
        );
        assert!(lines.is_empty(), "{:?} failure still printed {:?}", call, lines);
    }
}

#[tokio::test]
async fn failed_gas_price_keeps_earlier_lines_only() {
    let client = FakeChain::legacy().failing_on(Call::GasPrice);
    let (result, lines) = run(&client, &NativeUnits).await;

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("failed to fetch legacy gas price"));
    assert_eq!(lines, header());
}

#[tokio::test]
async fn accounts_are_listed_checksummed() {
    let client = FakeChain::market();
    let mut out = Vec::new();
    write_accounts(&client, &mut out).await.unwrap();

    let expected = format!(
        "{}\n{}\n",
        to_checksum(&signer(), None),
        to_checksum(&Address::from_low_u64_be(0xcafe), None)
    );
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}
