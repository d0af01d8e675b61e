//! Chain client for connecting to EVM-compatible networks.
//!
//! Wraps a configured alloy provider with a local signer so flows and
//! scenarios can submit transactions without touching provider plumbing.

use alloy::network::{Ethereum, EthereumWallet};
use alloy::primitives::Address;
use alloy::providers::fillers::{
    BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller,
};
use alloy::providers::{Identity, ProviderBuilder, RootProvider};
use alloy::signers::local::PrivateKeySigner;

use crate::config::{HarnessConfig, NetworkProfile};
use crate::error::IntegrationError;

/// The concrete provider type produced by `ProviderBuilder::new().wallet(...).connect_http(...)`.
///
/// Fills nonce, gas, and chain id, and signs with the supplied wallet.
pub type HttpProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
    Ethereum,
>;

/// A chain client wrapping an alloy provider with a local signer.
pub struct ChainClient {
    pub provider: HttpProvider,
    pub wallet: EthereumWallet,
    pub signer_address: Address,
    pub chain_id: u64,
}

impl ChainClient {
    /// Create a new chain client from an RPC URL and hex-encoded private key
    /// (with or without the "0x" prefix).
    pub fn new(rpc_url: &str, private_key: &str, chain_id: u64) -> Result<Self, IntegrationError> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|e| IntegrationError::ConfigError(format!("Invalid private key: {e}")))?;
        let signer_address = signer.address();

        let wallet = EthereumWallet::from(signer);

        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| IntegrationError::ConfigError(format!("Invalid RPC URL: {e}")))?;

        let provider = ProviderBuilder::new()
            .wallet(wallet.clone())
            .connect_http(url);

        Ok(Self {
            provider,
            wallet,
            signer_address,
            chain_id,
        })
    }

    /// Connect to a named network profile using the configured deployer key.
    ///
    /// Fails when the profile has no RPC URL or no deployer key is configured,
    /// matching the original setup where testnet entries without credentials
    /// simply cannot sign.
    pub fn from_profile(
        config: &HarnessConfig,
        profile: &NetworkProfile,
        chain_id: u64,
    ) -> Result<Self, IntegrationError> {
        let rpc_url = profile.rpc_url.as_deref().ok_or_else(|| {
            IntegrationError::ConfigError(format!("Network '{}' has no RPC URL", profile.name))
        })?;
        let key = config.deployer_key.as_deref().ok_or_else(|| {
            IntegrationError::ConfigError("DEV_PRIVKEY is not configured".into())
        })?;
        Self::new(rpc_url, key, chain_id)
    }

    /// Get a reference to the underlying provider.
    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil/Hardhat account #0)
    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_chain_client_creation() {
        let client = ChainClient::new("http://localhost:8545", TEST_KEY, 10);
        assert!(client.is_ok());
        let client = client.unwrap();
        assert_eq!(client.chain_id, 10);
        assert_ne!(client.signer_address, Address::ZERO);
    }

    #[test]
    fn test_invalid_private_key() {
        let result = ChainClient::new("http://localhost:8545", "not-a-key", 10);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_rpc_url() {
        let result = ChainClient::new("not a url", TEST_KEY, 10);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_profile_requires_url_and_key() {
        let config = HarnessConfig {
            mnemonic: None,
            fork: crate::config::HarnessConfig::from_env().fork,
            networks: vec![],
            deployer_key: None,
            etherscan_api_key: None,
            aggregator_url: "http://localhost".into(),
        };
        let profile = NetworkProfile {
            name: "goerli".into(),
            rpc_url: None,
        };
        assert!(ChainClient::from_profile(&config, &profile, 5).is_err());

        let profile = NetworkProfile {
            name: "goerli".into(),
            rpc_url: Some("http://localhost:8545".into()),
        };
        // URL present but still no deployer key
        assert!(ChainClient::from_profile(&config, &profile, 5).is_err());
    }
}
