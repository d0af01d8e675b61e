//! Process configuration, read from the environment exactly once at startup
//! and passed by reference to everything that needs network access.

/// Chain id of the fork source (Optimism mainnet).
pub const OPTIMISM_CHAIN_ID: u64 = 10;

/// Accounts provisioned on the forked chain.
pub const FORK_ACCOUNT_COUNT: u32 = 10;

/// Starting balance per forked account, in wei (10,000,000 native units).
pub const FORK_ACCOUNT_BALANCE_WEI: &str = "10000000000000000000000000";

/// Default aggregator quote API base URL.
pub const DEFAULT_AGGREGATOR_URL: &str = "https://api.1inch.io";

/// A named public network the harness can point at.
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    pub name: String,
    pub rpc_url: Option<String>,
}

/// Fork provisioning: source RPC, chain id, and funded test accounts.
#[derive(Debug, Clone)]
pub struct ForkConfig {
    pub source_url: Option<String>,
    pub chain_id: u64,
    pub account_count: u32,
    pub account_balance_wei: String,
}

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub mnemonic: Option<String>,
    pub fork: ForkConfig,
    pub networks: Vec<NetworkProfile>,
    pub deployer_key: Option<String>,
    pub etherscan_api_key: Option<String>,
    pub aggregator_url: String,
}

impl HarnessConfig {
    /// Build the configuration from process environment variables.
    ///
    /// Every value is optional; missing variables degrade to `None` or the
    /// documented default rather than failing startup.
    pub fn from_env() -> Self {
        Self {
            mnemonic: env_opt("MNEMONIC"),
            fork: ForkConfig {
                source_url: env_opt("OPTIMISM_URL"),
                chain_id: OPTIMISM_CHAIN_ID,
                account_count: FORK_ACCOUNT_COUNT,
                account_balance_wei: FORK_ACCOUNT_BALANCE_WEI.to_string(),
            },
            networks: vec![
                NetworkProfile {
                    name: "goerli".into(),
                    rpc_url: env_opt("GOERLI_URL"),
                },
                NetworkProfile {
                    name: "mumbai".into(),
                    rpc_url: env_opt("MUMBAI_URL"),
                },
            ],
            deployer_key: env_opt("DEV_PRIVKEY"),
            etherscan_api_key: env_opt("ETHERSCAN_API_KEY"),
            aggregator_url: env_opt("AGGREGATOR_URL")
                .unwrap_or_else(|| DEFAULT_AGGREGATOR_URL.to_string()),
        }
    }

    /// Look up a named network profile.
    pub fn network(&self, name: &str) -> Option<&NetworkProfile> {
        self.networks.iter().find(|n| n.name == name)
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
