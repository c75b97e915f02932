use anyhow::{bail, Context, Result};
use ethers_core::k256::ecdsa::SigningKey;
use ethers_core::types::{Address, BlockNumber, Bytes, Chain, U256};
use ethers_core::utils::secret_key_to_address;
use ethers_providers::{Http, Middleware, Provider};
use url::Url;

use crate::config::ConfigError;
use crate::models::{BlockSummary, ChainIdentity, FeeEstimate};
use crate::networks::NetworkProfile;

/// Priority fee assumed when the node does not answer `eth_maxPriorityFeePerGas`.
pub const DEFAULT_PRIORITY_FEE_WEI: u64 = 1_000_000_000;

/// Read-only view of a chain node, as needed by the reports.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// Every account the client can act for.
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// First account, used as the report signer.
    async fn signer_address(&self) -> Result<Address> {
        match self.accounts().await?.first() {
            Some(address) => Ok(*address),
            None => bail!("no signer accounts available; set PRIVATE_KEY or unlock an account on the node"),
        }
    }

    async fn network(&self) -> Result<ChainIdentity>;
    async fn balance(&self, address: Address) -> Result<U256>;
    async fn latest_block(&self) -> Result<BlockSummary>;
    async fn fee_data(&self) -> Result<FeeEstimate>;
    async fn gas_price(&self) -> Result<U256>;
}

pub struct EthClient {
    provider: Provider<Http>,
    signer: Option<Address>,
    profile: Option<&'static NetworkProfile>,
}

impl EthClient {
    pub fn new(rpc_url: &str, private_key: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .context("failed to build reqwest client")?;
        let url = Url::parse(rpc_url).context("invalid RPC URL")?;
        let transport = Http::new_with_client(url, client);
        let provider = Provider::new(transport);
        let signer = private_key.map(signer_from_key).transpose()?;
        Ok(Self {
            provider,
            signer,
            profile: None,
        })
    }

    /// Network profile the client was selected by. Its pinned chain id names
    /// the chain and is checked against the node.
    pub fn with_profile(mut self, profile: &'static NetworkProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    async fn max_priority_fee(&self) -> Option<U256> {
        match self
            .provider
            .request::<_, U256>("eth_maxPriorityFeePerGas", ())
            .await
        {
            Ok(fee) => Some(fee),
            Err(err) => {
                tracing::debug!("eth_maxPriorityFeePerGas unavailable ({}); using 1 gwei", err);
                None
            }
        }
    }
}

impl ChainClient for EthClient {
    async fn accounts(&self) -> Result<Vec<Address>> {
        if let Some(signer) = self.signer {
            return Ok(vec![signer]);
        }
        self.provider
            .get_accounts()
            .await
            .context("failed to fetch node accounts")
    }

    async fn network(&self) -> Result<ChainIdentity> {
        let chain_id = self
            .provider
            .get_chainid()
            .await
            .context("failed to fetch chain id")?;
        let chain_id = u64::try_from(chain_id)
            .map_err(|_| anyhow::anyhow!("chain id {} does not fit in u64", chain_id))?;

        let pinned = self
            .profile
            .and_then(|p| p.chain_id.map(|id| (p.name, id)));
        if let Some((name, expected)) = pinned {
            if expected != chain_id {
                tracing::warn!(
                    "network `{}` expects chain id {} but the node reports {}",
                    name,
                    expected,
                    chain_id
                );
            }
        }

        Ok(ChainIdentity {
            name: network_name(pinned, chain_id),
            chain_id,
        })
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        self.provider
            .get_balance(address, None)
            .await
            .with_context(|| format!("failed to fetch balance of {:?}", address))
    }

    async fn latest_block(&self) -> Result<BlockSummary> {
        let block = self
            .provider
            .get_block(BlockNumber::Latest)
            .await
            .context("failed to fetch latest block")?
            .context("node returned no latest block")?;
        let number = block.number.context("latest block has no number")?;
        Ok(BlockSummary {
            number: number.as_u64(),
            base_fee_per_gas: block.base_fee_per_gas,
        })
    }

    async fn fee_data(&self) -> Result<FeeEstimate> {
        let block = self.latest_block().await?;
        match block.base_fee_per_gas {
            Some(base_fee) => Ok(market_estimate(base_fee, self.max_priority_fee().await)),
            None => Ok(FeeEstimate::legacy(self.gas_price().await?)),
        }
    }

    async fn gas_price(&self) -> Result<U256> {
        self.provider
            .get_gas_price()
            .await
            .context("failed to fetch gas price")
    }
}

/// Fee-market estimate for the next block: `max_fee = 2 * base_fee + priority`,
/// with a 1 gwei priority fee when the node gave none.
pub fn market_estimate(base_fee: U256, priority: Option<U256>) -> FeeEstimate {
    let priority = priority.unwrap_or_else(|| U256::from(DEFAULT_PRIORITY_FEE_WEI));
    let max_fee = base_fee
        .saturating_mul(U256::from(2u64))
        .saturating_add(priority);
    FeeEstimate::market(Some(max_fee), Some(priority))
}

/// Known chain name for `chain_id`, `unknown` otherwise.
pub fn chain_name(chain_id: u64) -> String {
    Chain::try_from(chain_id)
        .map(|chain| chain.to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

/// The profile name when the node is on the profile's pinned chain.
fn network_name(pinned: Option<(&str, u64)>, chain_id: u64) -> String {
    match pinned {
        Some((name, expected)) if expected == chain_id => name.to_string(),
        _ => chain_name(chain_id),
    }
}

fn signer_from_key(key: &str) -> Result<Address, ConfigError> {
    let bytes: Bytes = key
        .parse()
        .map_err(|_| ConfigError::InvalidPrivateKey("not valid hex"))?;
    let signing_key = SigningKey::from_slice(&bytes)
        .map_err(|_| ConfigError::InvalidPrivateKey("not a valid secp256k1 key"))?;
    Ok(secret_key_to_address(&signing_key))
}
