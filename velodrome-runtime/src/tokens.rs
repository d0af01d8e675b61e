//! Token balance and allowance helpers shared by flows and scenarios.

use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use futures::future::try_join_all;

use crate::addresses::NATIVE_TOKEN;
use crate::contracts::{IERC20, IWETH};
use crate::error::IntegrationError;

/// Whether an asset address is the native-coin sentinel.
pub fn is_native(asset: Address) -> bool {
    asset == NATIVE_TOKEN
}

/// Read an account's balance of `asset`.
///
/// The native sentinel queries the chain's native balance; anything else is
/// treated as a standard fungible token.
pub async fn balance_of(
    provider: &impl Provider,
    asset: Address,
    account: Address,
) -> Result<U256, IntegrationError> {
    if is_native(asset) {
        provider
            .get_balance(account)
            .await
            .map_err(|e| IntegrationError::ChainError(format!("Native balance query failed: {e}")))
    } else {
        IERC20::new(asset, provider)
            .balanceOf(account)
            .call()
            .await
            .map_err(|e| {
                IntegrationError::TokenError(format!("balanceOf({asset}) failed: {e}"))
            })
    }
}

/// Snapshot an account's balances across several assets at once.
pub async fn balances_of(
    provider: &impl Provider,
    assets: &[Address],
    account: Address,
) -> Result<Vec<(Address, U256)>, IntegrationError> {
    let queries = assets
        .iter()
        .map(|&asset| async move { Ok((asset, balance_of(provider, asset, account).await?)) });
    try_join_all(queries).await
}

/// Grant `spender` an allowance of exactly `amount` from the signing account.
///
/// No check is made against the prior allowance and nothing is revoked
/// afterwards; the adapter consumes the allowance in the call that follows.
pub async fn approve(
    provider: &impl Provider,
    token: Address,
    spender: Address,
    amount: U256,
) -> Result<(), IntegrationError> {
    let receipt = IERC20::new(token, provider)
        .approve(spender, amount)
        .send()
        .await
        .map_err(|e| IntegrationError::TokenError(format!("approve({token}) send failed: {e}")))?
        .get_receipt()
        .await
        .map_err(|e| {
            IntegrationError::TokenError(format!("approve({token}) receipt failed: {e}"))
        })?;

    if !receipt.status() {
        return Err(IntegrationError::TokenError(format!(
            "approve({token}, {spender}, {amount}) reverted"
        )));
    }
    Ok(())
}

/// Wrap native coin into its canonical wrapped token by calling the wrapped
/// token's payable deposit entry point with the amount attached as value.
pub async fn wrap_native(
    provider: &impl Provider,
    wrapped: Address,
    amount: U256,
) -> Result<(), IntegrationError> {
    let receipt = IWETH::new(wrapped, provider)
        .deposit()
        .value(amount)
        .send()
        .await
        .map_err(|e| IntegrationError::TokenError(format!("wrap send failed: {e}")))?
        .get_receipt()
        .await
        .map_err(|e| IntegrationError::TokenError(format!("wrap receipt failed: {e}")))?;

    if !receipt.status() {
        return Err(IntegrationError::TokenError(format!(
            "wrapping {amount} into {wrapped} reverted"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addresses::{USDC, WETH};
    use alloy::network::EthereumWallet;
    use alloy::node_bindings::Anvil;
    use alloy::providers::ProviderBuilder;
    use alloy::signers::local::PrivateKeySigner;

    #[test]
    fn test_is_native_sentinel() {
        assert!(is_native(NATIVE_TOKEN));
        assert!(!is_native(WETH));
        assert!(!is_native(USDC));
        assert!(!is_native(Address::ZERO));
    }

    // There are no token contracts on a bare local node, so the calls below
    // land as plain transactions; that is enough to exercise the native
    // balance path and the send/receipt plumbing.
    #[tokio::test]
    async fn test_native_balance_and_send_plumbing() {
        let Ok(anvil) = Anvil::new().try_spawn() else {
            eprintln!("skipping: anvil not available");
            return;
        };
        let signer: PrivateKeySigner = anvil.keys()[0].clone().into();
        let account = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(anvil.endpoint().parse().unwrap());

        let before = balance_of(&provider, NATIVE_TOKEN, account).await.unwrap();
        assert!(before > U256::ZERO);

        let snapshot = balances_of(&provider, &[NATIVE_TOKEN], account).await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].0, NATIVE_TOKEN);

        let sink = anvil.addresses()[7];
        wrap_native(&provider, sink, U256::from(1_000u64)).await.unwrap();
        approve(&provider, sink, anvil.addresses()[8], U256::from(5u64))
            .await
            .unwrap();

        let after = balance_of(&provider, NATIVE_TOKEN, account).await.unwrap();
        assert!(after < before, "value transfer and gas should reduce the balance");
    }
}
