//! Swap-quote client for the 1inch-style aggregator API.
//!
//! Quotes are fetched fresh per swap step and consumed by the single on-chain
//! call that follows; nothing here caches, retries, or revalidates a quote.

use alloy::primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::config::DEFAULT_AGGREGATOR_URL;
use crate::error::IntegrationError;

/// Default slippage tolerance, in the aggregator's own units.
pub const DEFAULT_SLIPPAGE: u32 = 10;

/// Default aggregator API version.
pub const DEFAULT_API_VERSION: u32 = 4;

/// Parameters for one swap-quote request.
#[derive(Debug, Clone)]
pub struct SwapQuoteRequest {
    pub chain_id: u64,
    pub src_token: Address,
    pub dst_token: Address,
    /// Amount to swap, in the source token's smallest denomination.
    pub amount: U256,
    /// Account the swap proceeds are delivered to.
    pub dest_receiver: Address,
    pub slippage: u32,
    pub excluded_protocols: Vec<String>,
}

impl SwapQuoteRequest {
    pub fn new(
        chain_id: u64,
        src_token: Address,
        dst_token: Address,
        amount: U256,
        dest_receiver: Address,
    ) -> Self {
        Self {
            chain_id,
            src_token,
            dst_token,
            amount,
            dest_receiver,
            slippage: DEFAULT_SLIPPAGE,
            excluded_protocols: Vec::new(),
        }
    }

    pub fn with_slippage(mut self, slippage: u32) -> Self {
        self.slippage = slippage;
        self
    }

    pub fn with_excluded_protocols(mut self, protocols: Vec<String>) -> Self {
        self.excluded_protocols = protocols;
        self
    }
}

/// Transaction descriptor inside a quote: the call target and encoded payload
/// that perform the swap and deliver proceeds to the receiver.
#[derive(Debug, Clone, Deserialize)]
pub struct SwapTransaction {
    pub to: Address,
    pub data: Bytes,
    #[serde(default)]
    pub value: Option<String>,
}

/// Aggregator response. Only the transaction descriptor is load-bearing;
/// everything else the API returns is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SwapQuote {
    pub tx: SwapTransaction,
    #[serde(rename = "toTokenAmount", default)]
    pub to_token_amount: Option<String>,
}

/// Capability interface for obtaining swap quotes, so scenarios can inject
/// canned responses instead of depending on the live aggregator.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn swap_quote(&self, request: &SwapQuoteRequest) -> Result<SwapQuote, IntegrationError>;
}

#[async_trait]
impl<T: QuoteProvider + ?Sized> QuoteProvider for &T {
    async fn swap_quote(&self, request: &SwapQuoteRequest) -> Result<SwapQuote, IntegrationError> {
        (**self).swap_quote(request).await
    }
}

/// Live aggregator client. One outbound GET per quote, no retry or backoff;
/// any transport failure or non-success status aborts the calling flow.
#[derive(Debug, Clone)]
pub struct OneInchClient {
    base_url: String,
    version: u32,
    debug: bool,
    client: reqwest::Client,
}

impl OneInchClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            version: DEFAULT_API_VERSION,
            debug: false,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// When set, the constructed request URL is emitted to the diagnostic
    /// stream before each request.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    fn request_url(&self, request: &SwapQuoteRequest) -> String {
        let mut url = format!(
            "{}/v{}.0/{}/swap?fromTokenAddress={}&toTokenAddress={}&amount={}&fromAddress={}&slippage={}&disableEstimate=true&destReceiver={}",
            self.base_url,
            self.version,
            request.chain_id,
            request.src_token,
            request.dst_token,
            request.amount,
            Address::ZERO,
            request.slippage,
            request.dest_receiver,
        );
        if !request.excluded_protocols.is_empty() {
            url.push_str("&excludedProtocols=");
            url.push_str(&request.excluded_protocols.join(","));
        }
        url
    }
}

impl Default for OneInchClient {
    fn default() -> Self {
        Self::new(DEFAULT_AGGREGATOR_URL.to_string())
    }
}

#[async_trait]
impl QuoteProvider for OneInchClient {
    async fn swap_quote(&self, request: &SwapQuoteRequest) -> Result<SwapQuote, IntegrationError> {
        let url = self.request_url(request);
        if self.debug {
            info!(%url, "aggregator swap quote request");
        }

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntegrationError::QuoteFailed(format!(
                "aggregator returned {status}: {body}"
            )));
        }

        let quote: SwapQuote = response
            .json()
            .await
            .map_err(|e| IntegrationError::QuoteFailed(e.to_string()))?;
        Ok(quote)
    }
}
