/// Local node started by `npx hardhat node`.
pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";
pub const HARDHAT_CHAIN_ID: u64 = 31337;
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Where a network's RPC URL comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    /// Fixed local endpoint.
    Local,
    /// First set variable wins.
    Env(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkProfile {
    pub name: &'static str,
    pub url: UrlSource,
    /// Chain id the node is expected to report, when pinned.
    pub chain_id: Option<u64>,
}

const GENERIC: UrlSource = UrlSource::Env(&["NETWORK_RPC_URL"]);

const fn generic(name: &'static str) -> NetworkProfile {
    NetworkProfile {
        name,
        url: GENERIC,
        chain_id: None,
    }
}

pub const PROFILES: &[NetworkProfile] = &[
    NetworkProfile {
        name: "hardhat",
        url: UrlSource::Local,
        chain_id: Some(HARDHAT_CHAIN_ID),
    },
    NetworkProfile {
        name: "localhost",
        url: UrlSource::Local,
        chain_id: Some(HARDHAT_CHAIN_ID),
    },
    NetworkProfile {
        name: "sepolia",
        url: UrlSource::Env(&["SEPOLIA_RPC_URL", "NETWORK_RPC_URL"]),
        chain_id: Some(SEPOLIA_CHAIN_ID),
    },
    generic("mainnet"),
    generic("ropsten"),
    generic("rinkeby"),
    generic("goerli"),
    generic("mumbai"),
    generic("moonbase"),
    generic("polygon"),
    generic("polygonedge"),
    generic("bsc"),
    generic("energyweb"),
    generic("moonriver"),
    generic("gaiaxtestnet"),
    generic("alfajores"),
    generic("celo"),
    generic("filecointestnet"),
    generic("oasis_saphire"),
    generic("oasis_saphire_testnet"),
    generic("optimism_sepolia"),
    generic("optimism"),
    generic("base"),
];

pub fn find(name: &str) -> Option<&'static NetworkProfile> {
    PROFILES.iter().find(|p| p.name == name)
}

impl NetworkProfile {
    /// Resolves the RPC URL, treating empty variables as unset.
    pub fn resolve_url<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self.url {
            UrlSource::Local => Some(LOCAL_RPC_URL.to_string()),
            UrlSource::Env(vars) => vars
                .iter()
                .filter_map(|var| lookup(*var))
                .find(|url| !url.trim().is_empty()),
        }
    }
}
