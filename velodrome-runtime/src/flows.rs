//! Deposit and withdraw flows against the integration adapter.
//!
//! Each flow runs the fixed sequence: size the swap, fetch a quote (when the
//! entry/exit asset differs from the pool-side asset), submit the adapter
//! call, and wait for the receipt. A quote is consumed by the one call that
//! follows it; flows never cache, reuse, or refresh quotes, and a revert is
//! terminal.

use std::fmt;

use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::Provider;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::addresses::ONE_INCH_ROUTER;
use crate::contracts::IVelodromeIntegration;
use crate::error::IntegrationError;
use crate::quote::{QuoteProvider, SwapQuoteRequest};
use crate::tokens;

/// Basis-point denominator for the goodwill deduction.
const BPS_DENOMINATOR: u64 = 10_000;

/// Phases a flow passes through, in order. `Confirmed` and `Reverted` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    Idle,
    QuoteRequested,
    QuoteReceived,
    Submitted,
    Confirmed,
    Reverted,
}

impl FlowPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, FlowPhase::Confirmed | FlowPhase::Reverted)
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowPhase::Idle => "idle",
            FlowPhase::QuoteRequested => "quote_requested",
            FlowPhase::QuoteReceived => "quote_received",
            FlowPhase::Submitted => "submitted",
            FlowPhase::Confirmed => "confirmed",
            FlowPhase::Reverted => "reverted",
        };
        f.write_str(s)
    }
}

/// Parameters for one entry operation. Minimum output and the override
/// addresses default to zero, matching the adapter's no-override call shape.
#[derive(Debug, Clone)]
pub struct DepositRequest {
    pub entry_token: Address,
    pub entry_amount: U256,
    pub pool: Address,
    pub deposit_token: Address,
    pub min_liquidity_out: U256,
    pub underlying_target: Address,
    pub target_deposit_token: Address,
    pub affiliate: Address,
}

impl DepositRequest {
    pub fn new(entry_token: Address, entry_amount: U256, pool: Address, deposit_token: Address) -> Self {
        Self {
            entry_token,
            entry_amount,
            pool,
            deposit_token,
            min_liquidity_out: U256::ZERO,
            underlying_target: Address::ZERO,
            target_deposit_token: Address::ZERO,
            affiliate: Address::ZERO,
        }
    }

    pub fn with_min_liquidity_out(mut self, min: U256) -> Self {
        self.min_liquidity_out = min;
        self
    }
}

/// Parameters for one exit operation. The target withdraw token is the
/// pool-side asset the adapter removes liquidity into; when it differs from
/// the exit token, the flow sizes a swap quote from the adapter's preview.
#[derive(Debug, Clone)]
pub struct WithdrawRequest {
    pub pool: Address,
    pub liquidity_amount: U256,
    pub exit_token: Address,
    pub min_exit_amount: U256,
    pub underlying_target: Address,
    pub target_withdraw_token: Address,
    pub affiliate: Address,
}

impl WithdrawRequest {
    pub fn new(
        pool: Address,
        liquidity_amount: U256,
        exit_token: Address,
        target_withdraw_token: Address,
    ) -> Self {
        Self {
            pool,
            liquidity_amount,
            exit_token,
            min_exit_amount: U256::ZERO,
            underlying_target: Address::ZERO,
            target_withdraw_token,
            affiliate: Address::ZERO,
        }
    }

    pub fn with_min_exit_amount(mut self, min: U256) -> Self {
        self.min_exit_amount = min;
        self
    }
}

/// Outcome of a confirmed flow.
#[derive(Debug, Clone)]
pub struct FlowOutcome {
    pub id: Uuid,
    pub phase: FlowPhase,
    pub tx_hash: String,
    pub block_number: Option<u64>,
    pub gas_used: Option<u128>,
    pub confirmed_at: DateTime<Utc>,
}

/// Drives deposit/withdraw flows against one deployed adapter instance.
///
/// Holds the signing provider, the quote capability, and the adapter-level
/// constants (swap target, goodwill) so scenarios only describe the
/// per-operation parameters.
pub struct IntegrationFlows<P, Q> {
    provider: P,
    quotes: Q,
    integration: Address,
    swap_target: Address,
    goodwill_bps: u32,
    chain_id: u64,
}

impl<P: Provider, Q: QuoteProvider> IntegrationFlows<P, Q> {
    pub fn new(provider: P, quotes: Q, integration: Address, chain_id: u64) -> Self {
        Self {
            provider,
            quotes,
            integration,
            swap_target: ONE_INCH_ROUTER,
            goodwill_bps: 0,
            chain_id,
        }
    }

    pub fn with_swap_target(mut self, swap_target: Address) -> Self {
        self.swap_target = swap_target;
        self
    }

    pub fn with_goodwill_bps(mut self, goodwill_bps: u32) -> Self {
        self.goodwill_bps = goodwill_bps;
        self
    }

    pub fn integration_address(&self) -> Address {
        self.integration
    }

    /// Enter a pool from an arbitrary entry asset.
    ///
    /// Native entry attaches the entry amount as call value; an ERC-20 entry
    /// requires the caller to have approved the adapter for the entry amount
    /// beforehand (`tokens::approve`).
    pub async fn deposit(&self, request: &DepositRequest) -> Result<FlowOutcome, IntegrationError> {
        let id = Uuid::new_v4();
        info!(
            flow = %id,
            phase = %FlowPhase::Idle,
            entry = %request.entry_token,
            pool = %request.pool,
            amount = %request.entry_amount,
            "deposit flow starting"
        );

        let (swap_target, swap_data) = if request.entry_token == request.deposit_token {
            // Entry asset already is the deposit asset: no swap leg.
            (self.swap_target, Bytes::new())
        } else {
            let swap_amount =
                request.entry_amount - goodwill_portion(request.entry_amount, self.goodwill_bps);
            info!(flow = %id, phase = %FlowPhase::QuoteRequested, amount = %swap_amount, "requesting entry swap quote");
            let quote = self
                .quotes
                .swap_quote(&SwapQuoteRequest::new(
                    self.chain_id,
                    request.entry_token,
                    request.deposit_token,
                    swap_amount,
                    self.integration,
                ))
                .await?;
            info!(flow = %id, phase = %FlowPhase::QuoteReceived, target = %quote.tx.to, "entry swap quote received");
            (quote.tx.to, quote.tx.data)
        };

        let integration = IVelodromeIntegration::new(self.integration, &self.provider);
        let mut call = integration.deposit(
            request.entry_token,
            request.entry_amount,
            request.pool,
            request.deposit_token,
            request.min_liquidity_out,
            request.underlying_target,
            request.target_deposit_token,
            swap_target,
            swap_data,
            request.affiliate,
        );
        if tokens::is_native(request.entry_token) {
            call = call.value(request.entry_amount);
        }

        info!(flow = %id, phase = %FlowPhase::Submitted, "submitting deposit");
        self.finish(id, "deposit", call.send().await).await
    }

    /// Exit a pool into an arbitrary exit asset.
    ///
    /// The caller must have approved the adapter for the liquidity amount
    /// (liquidity tokens are ERC-20-like). When the exit asset differs from
    /// the target withdraw asset, the swap leg is sized from the adapter's
    /// read-only preview of the removable amount.
    pub async fn withdraw(
        &self,
        request: &WithdrawRequest,
    ) -> Result<FlowOutcome, IntegrationError> {
        let id = Uuid::new_v4();
        info!(
            flow = %id,
            phase = %FlowPhase::Idle,
            exit = %request.exit_token,
            pool = %request.pool,
            liquidity = %request.liquidity_amount,
            "withdraw flow starting"
        );

        let (swap_target, swap_data) = if request.exit_token == request.target_withdraw_token {
            (self.swap_target, Bytes::new())
        } else {
            let underlying_return = self
                .remove_asset_return(
                    request.pool,
                    request.target_withdraw_token,
                    request.liquidity_amount,
                )
                .await?;
            info!(flow = %id, phase = %FlowPhase::QuoteRequested, preview = %underlying_return, "requesting exit swap quote");
            let quote = self
                .quotes
                .swap_quote(&SwapQuoteRequest::new(
                    self.chain_id,
                    request.target_withdraw_token,
                    request.exit_token,
                    underlying_return,
                    self.integration,
                ))
                .await?;
            info!(flow = %id, phase = %FlowPhase::QuoteReceived, target = %quote.tx.to, "exit swap quote received");
            (quote.tx.to, quote.tx.data)
        };

        let integration = IVelodromeIntegration::new(self.integration, &self.provider);
        let call = integration.withdraw(
            request.pool,
            request.liquidity_amount,
            request.exit_token,
            request.min_exit_amount,
            request.underlying_target,
            request.target_withdraw_token,
            swap_target,
            swap_data,
            request.affiliate,
        );

        info!(flow = %id, phase = %FlowPhase::Submitted, "submitting withdraw");
        self.finish(id, "withdraw", call.send().await).await
    }

    /// Preview how much of `target_token` the given liquidity amount removes.
    pub async fn remove_asset_return(
        &self,
        pool: Address,
        target_token: Address,
        liquidity_amount: U256,
    ) -> Result<U256, IntegrationError> {
        IVelodromeIntegration::new(self.integration, &self.provider)
            .removeAssetReturn(pool, target_token, liquidity_amount)
            .call()
            .await
            .map_err(|e| IntegrationError::ChainError(format!("removeAssetReturn failed: {e}")))
    }

    /// The adapter's own sentinel-aware balance query.
    pub async fn adapter_balance(
        &self,
        token: Address,
        account: Address,
    ) -> Result<U256, IntegrationError> {
        IVelodromeIntegration::new(self.integration, &self.provider)
            .getBalance(token, account)
            .call()
            .await
            .map_err(|e| IntegrationError::ChainError(format!("getBalance failed: {e}")))
    }

    async fn finish(
        &self,
        id: Uuid,
        op: &str,
        sent: Result<
            alloy::providers::PendingTransactionBuilder<alloy::network::Ethereum>,
            alloy::contract::Error,
        >,
    ) -> Result<FlowOutcome, IntegrationError> {
        let pending = sent.map_err(|e| {
            info!(flow = %id, phase = %FlowPhase::Reverted, "{op} rejected at submission");
            IntegrationError::Reverted(format!("{op} rejected at submission: {e}"))
        })?;

        let tx_hash = format!("0x{}", hex::encode(pending.tx_hash().as_slice()));

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| IntegrationError::ChainError(format!("{op} receipt fetch failed: {e}")))?;

        if !receipt.status() {
            info!(flow = %id, phase = %FlowPhase::Reverted, tx = %tx_hash, "{op} reverted");
            return Err(IntegrationError::Reverted(format!(
                "{op} transaction {tx_hash} reverted"
            )));
        }

        info!(flow = %id, phase = %FlowPhase::Confirmed, tx = %tx_hash, "{op} confirmed");
        Ok(FlowOutcome {
            id,
            phase: FlowPhase::Confirmed,
            tx_hash,
            block_number: receipt.block_number,
            gas_used: Some(receipt.gas_used.into()),
            confirmed_at: Utc::now(),
        })
    }
}

/// Basis-point portion of `amount` deducted as goodwill before the entry swap.
pub fn goodwill_portion(amount: U256, goodwill_bps: u32) -> U256 {
    amount * U256::from(goodwill_bps) / U256::from(BPS_DENOMINATOR)
}
