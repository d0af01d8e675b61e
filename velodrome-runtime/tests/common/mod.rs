//! Fork fixture for the end-to-end scenarios.
//!
//! Spawns an Anvil fork of the configured Optimism RPC, provisions the funded
//! test accounts, and deploys a fresh Vault + VelodromeIntegration pair from
//! forge artifacts so every scenario starts from a clean snapshot.
//!
//! The adapter contracts live outside this repository; scenarios skip with a
//! diagnostic when the fork URL, the anvil binary, or the artifacts are
//! unavailable instead of failing the offline suite.

use alloy::network::EthereumWallet;
use alloy::node_bindings::{Anvil, AnvilInstance};
use alloy::primitives::{Address, Bytes, TxKind, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;

use velodrome_runtime::chain::ChainClient;
use velodrome_runtime::config::HarnessConfig;

/// Goodwill basis points the adapter is deployed with.
pub const GOODWILL: u64 = 0;

/// Affiliate split the adapter is deployed with.
pub const AFFILIATE_SPLIT: u64 = 0;

pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18))
}

pub struct ForkFixture {
    pub anvil: AnvilInstance,
    pub deployer: PrivateKeySigner,
    pub user: PrivateKeySigner,
    pub vault: Address,
    pub integration: Address,
    pub chain_id: u64,
}

impl ForkFixture {
    /// Spin up the fork and deploy fresh contract instances, or `None` with a
    /// diagnostic when the environment cannot run live scenarios.
    pub async fn try_new(config: &HarnessConfig) -> Option<Self> {
        let Some(fork_url) = config.fork.source_url.clone() else {
            eprintln!("skipping: OPTIMISM_URL is not set");
            return None;
        };
        let Some(vault_bytecode) = load_artifact("Vault") else {
            eprintln!("skipping: Vault artifact not found (set ARTIFACTS_DIR)");
            return None;
        };
        let Some(integration_bytecode) = load_artifact("VelodromeIntegration") else {
            eprintln!("skipping: VelodromeIntegration artifact not found (set ARTIFACTS_DIR)");
            return None;
        };

        let balance_eth = wei_to_whole_units(&config.fork.account_balance_wei);
        let mut anvil = Anvil::new()
            .fork(fork_url)
            .chain_id(config.fork.chain_id)
            .args(vec![
                "--accounts".to_string(),
                config.fork.account_count.to_string(),
                "--balance".to_string(),
                balance_eth,
            ]);
        if let Some(mnemonic) = &config.mnemonic {
            anvil = anvil.mnemonic(mnemonic.clone());
        }

        let anvil = match anvil.try_spawn() {
            Ok(instance) => instance,
            Err(e) => {
                eprintln!("skipping: anvil spawn failed: {e}");
                return None;
            }
        };

        let deployer: PrivateKeySigner = anvil.keys()[0].clone().into();
        let user: PrivateKeySigner = anvil.keys()[1].clone().into();

        let deployer_provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(deployer.clone()))
            .connect_http(anvil.endpoint().parse().unwrap());

        let vault = deploy_contract(&deployer_provider, vault_bytecode, vec![]).await;

        let constructor_args = alloy::sol_types::SolValue::abi_encode(&(
            U256::from(GOODWILL),
            U256::from(AFFILIATE_SPLIT),
            vault,
        ));
        let integration =
            deploy_contract(&deployer_provider, integration_bytecode, constructor_args).await;

        let chain_id = config.fork.chain_id;
        Some(Self {
            anvil,
            deployer,
            user,
            vault,
            integration,
            chain_id,
        })
    }

    /// Chain client signing as the scenario user.
    pub fn user_client(&self) -> ChainClient {
        let key = format!("0x{}", hex::encode(self.user.to_bytes()));
        ChainClient::new(&self.anvil.endpoint(), &key, self.chain_id)
            .expect("user chain client")
    }

    pub fn user_address(&self) -> Address {
        self.user.address()
    }
}

/// Read compiled contract bytecode from forge output artifacts.
///
/// Searches `$ARTIFACTS_DIR` (default `<crate>/artifacts`) for
/// `<Name>.sol/<Name>.json` and the flat `<Name>.json` layout.
fn load_artifact(contract_name: &str) -> Option<Vec<u8>> {
    let out_dir = std::env::var("ARTIFACTS_DIR")
        .unwrap_or_else(|_| format!("{}/artifacts", env!("CARGO_MANIFEST_DIR")));

    let primary = format!("{out_dir}/{contract_name}.sol/{contract_name}.json");
    let fallback = format!("{out_dir}/{contract_name}.json");

    let path = if std::path::Path::new(&primary).exists() {
        primary
    } else if std::path::Path::new(&fallback).exists() {
        fallback
    } else {
        return None;
    };

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).ok()?).ok()?;
    let bytecode_hex = json["bytecode"]["object"]
        .as_str()?
        .strip_prefix("0x")?;
    hex::decode(bytecode_hex).ok()
}

/// Deploy a contract to the provider, returning its address.
pub async fn deploy_contract(
    provider: &impl Provider,
    bytecode: Vec<u8>,
    constructor_args: Vec<u8>,
) -> Address {
    let mut deploy_data = bytecode;
    deploy_data.extend_from_slice(&constructor_args);

    let mut tx = alloy::rpc::types::TransactionRequest::default().input(
        alloy::rpc::types::TransactionInput::both(Bytes::from(deploy_data)),
    );
    tx.to = Some(TxKind::Create);

    let pending = provider
        .send_transaction(tx)
        .await
        .expect("deploy tx send failed");
    let receipt = pending.get_receipt().await.expect("deploy tx receipt failed");
    receipt
        .contract_address
        .expect("no contract address in receipt")
}

fn wei_to_whole_units(wei: &str) -> String {
    let wei = U256::from_str_radix(wei, 10).unwrap_or(U256::ZERO);
    (wei / U256::from(10u64).pow(U256::from(18))).to_string()
}
