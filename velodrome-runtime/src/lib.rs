pub mod addresses;
pub mod chain;
pub mod config;
pub mod contracts;
pub mod error;
pub mod flows;
pub mod quote;
pub mod tokens;

pub use config::HarnessConfig;
pub use error::IntegrationError;
pub use flows::{DepositRequest, FlowOutcome, FlowPhase, IntegrationFlows, WithdrawRequest};
pub use quote::{OneInchClient, QuoteProvider, SwapQuote, SwapQuoteRequest};
