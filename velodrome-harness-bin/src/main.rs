//! Binary runner for manual zap flows.
//!
//! Loads the environment configuration once, connects to the requested
//! network, and drives a single deposit flow (optionally followed by a
//! withdraw back out) against an already-deployed adapter, logging balances
//! for inspection. The forked-chain scenarios live in the runtime crate's
//! test suite; this runner exists for the public testnet profiles.

use alloy::primitives::{Address, U256};

use velodrome_runtime::addresses::NATIVE_TOKEN;
use velodrome_runtime::chain::ChainClient;
use velodrome_runtime::config::HarnessConfig;
use velodrome_runtime::error::IntegrationError;
use velodrome_runtime::flows::{DepositRequest, IntegrationFlows, WithdrawRequest};
use velodrome_runtime::quote::OneInchClient;
use velodrome_runtime::tokens;

#[tokio::main]
async fn main() -> Result<(), IntegrationError> {
    dotenvy::dotenv().ok();
    setup_log();

    let config = HarnessConfig::from_env();

    // Target network: an explicit RPC_URL wins, otherwise a named profile
    // from the configuration (goerli, mumbai).
    let rpc_url = std::env::var("RPC_URL").ok().or_else(|| {
        std::env::var("NETWORK")
            .ok()
            .and_then(|name| config.network(&name).and_then(|n| n.rpc_url.clone()))
    });
    let rpc_url = rpc_url
        .ok_or_else(|| IntegrationError::ConfigError("Set RPC_URL or NETWORK".into()))?;

    let chain_id: u64 = std::env::var("CHAIN_ID")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(config.fork.chain_id);

    let private_key = std::env::var("PRIVATE_KEY")
        .ok()
        .or_else(|| config.deployer_key.clone())
        .ok_or_else(|| {
            IntegrationError::ConfigError("Set PRIVATE_KEY or DEV_PRIVKEY".into())
        })?;

    let integration = env_address("INTEGRATION_ADDRESS")?;
    let pool = env_address("POOL_ADDRESS")?;
    let deposit_token = env_address("DEPOSIT_TOKEN")?;
    let entry_token = if std::env::var("ENTRY_TOKEN").is_ok() {
        env_address("ENTRY_TOKEN")?
    } else {
        NATIVE_TOKEN
    };
    let entry_amount = env_u256("ENTRY_AMOUNT_WEI")?;
    let withdraw_token = env_address("WITHDRAW_TOKEN").ok();

    let client = ChainClient::new(&rpc_url, &private_key, chain_id)?;
    let account = client.signer_address;
    tracing::info!(%account, chain_id, "connected");

    let quotes = OneInchClient::new(config.aggregator_url.clone()).with_debug(true);
    let flows = IntegrationFlows::new(&client.provider, &quotes, integration, chain_id);

    // ── Deposit ──────────────────────────────────────────────────────────────
    if !tokens::is_native(entry_token) {
        tokens::approve(&client.provider, entry_token, integration, entry_amount).await?;
        tracing::info!(token = %entry_token, amount = %entry_amount, "entry amount approved");
    }

    let outcome = flows
        .deposit(&DepositRequest::new(entry_token, entry_amount, pool, deposit_token))
        .await?;
    tracing::info!(tx = %outcome.tx_hash, block = ?outcome.block_number, "deposit confirmed");

    let liquidity = tokens::balance_of(&client.provider, pool, account).await?;
    tracing::info!(%liquidity, pool = %pool, "liquidity balance after deposit");

    // ── Optional withdraw back out ───────────────────────────────────────────
    let Some(exit_token) = withdraw_token else {
        return Ok(());
    };

    tokens::approve(&client.provider, pool, integration, liquidity).await?;

    let exit_before = tokens::balance_of(&client.provider, exit_token, account).await?;
    let outcome = flows
        .withdraw(&WithdrawRequest::new(pool, liquidity, exit_token, deposit_token))
        .await?;
    tracing::info!(tx = %outcome.tx_hash, block = ?outcome.block_number, "withdraw confirmed");

    let exit_after = tokens::balance_of(&client.provider, exit_token, account).await?;
    tracing::info!(%exit_before, %exit_after, token = %exit_token, "exit balance");

    Ok(())
}

fn env_address(key: &str) -> Result<Address, IntegrationError> {
    let value = std::env::var(key)
        .map_err(|_| IntegrationError::ConfigError(format!("{key} is not set")))?;
    value
        .parse()
        .map_err(|e| IntegrationError::ConfigError(format!("Invalid {key} '{value}': {e}")))
}

fn env_u256(key: &str) -> Result<U256, IntegrationError> {
    let value = std::env::var(key)
        .map_err(|_| IntegrationError::ConfigError(format!("{key} is not set")))?;
    U256::from_str_radix(&value, 10)
        .map_err(|e| IntegrationError::ConfigError(format!("Invalid {key} '{value}': {e}")))
}

fn setup_log() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};
    if tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .is_err()
    {}
}
