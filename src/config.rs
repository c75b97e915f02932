use std::env;
use std::path::PathBuf;

use crate::networks::{self, NetworkProfile};
use crate::units::ClientShape;

pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Settings from the environment. Network and client-shape values are only
/// validated when a command asks for them, so offline commands are not
/// blocked by node settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub network_name: String,
    network: Option<&'static NetworkProfile>,
    rpc_url: Option<String>,
    pub private_key: Option<String>,
    pub contract_name: Option<String>,
    pub artifacts_dir: PathBuf,
    client_shape: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("unknown network `{0}`")]
    UnknownNetwork(String),
    #[error("no RPC URL for network `{0}`; set NETWORK_RPC_URL or pass --rpc-url")]
    MissingRpcUrl(String),
    #[error("missing contract name; pass --name or set CONTRACT_NAME, e.g. CONTRACT_NAME=MockERC20")]
    MissingContractName,
    #[error("invalid CLIENT_SHAPE `{0}`; expected `native` or `legacy`")]
    InvalidClientShape(String),
    #[error("invalid PRIVATE_KEY: {0}")]
    InvalidPrivateKey(&'static str),
}

impl Config {
    pub fn from_env(network: &str) -> Self {
        Self::from_lookup(network, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(network: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = networks::find(network);
        let rpc_url = profile.and_then(|p| p.resolve_url(&lookup));

        let private_key = lookup("PRIVATE_KEY")
            .map(|k| add_0x(k.trim()))
            .filter(|k| !k.is_empty());
        let contract_name = lookup("CONTRACT_NAME").and_then(non_empty);
        let artifacts_dir = lookup("ARTIFACTS_DIR")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_ARTIFACTS_DIR.to_string())
            .into();
        let client_shape = lookup("CLIENT_SHAPE").and_then(non_empty);

        Self {
            network_name: network.to_string(),
            network: profile,
            rpc_url,
            private_key,
            contract_name,
            artifacts_dir,
            client_shape,
        }
    }

    pub fn network(&self) -> Result<&'static NetworkProfile, ConfigError> {
        self.network
            .ok_or_else(|| ConfigError::UnknownNetwork(self.network_name.clone()))
    }

    /// RPC URL of the selected network, required by every command that talks to a node.
    pub fn require_rpc_url(&self) -> Result<&str, ConfigError> {
        let profile = self.network()?;
        self.rpc_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingRpcUrl(profile.name.to_string()))
    }

    /// `CLIENT_SHAPE`, defaulting to native.
    pub fn client_shape(&self) -> Result<ClientShape, ConfigError> {
        match &self.client_shape {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidClientShape(raw.clone())),
            None => Ok(ClientShape::default()),
        }
    }
}

/// Prefixes a hex private key with `0x` when it lacks one.
pub fn add_0x(key: &str) -> String {
    if key.is_empty() || key.starts_with("0x") {
        key.to_string()
    } else {
        format!("0x{}", key)
    }
}

fn non_empty(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
