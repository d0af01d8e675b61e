//! Shared asset and pool address tables (Optimism unless noted).

use alloy::primitives::{Address, address};

/// Sentinel address the adapter uses for the native coin.
pub const NATIVE_TOKEN: Address = address!("eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");

pub const ZERO_ADDRESS: Address = Address::ZERO;

/// 1inch AggregationRouterV4 (same deployment address across chains).
pub const ONE_INCH_ROUTER: Address = address!("1111111254fb6c44bac0bed2854e76f90643097d");

pub const WETH: Address = address!("4200000000000000000000000000000000000006");
pub const USDC: Address = address!("7f5c764cbc14f9669b88837ca1490cca17c31607");
pub const DAI: Address = address!("da10009cbd5d07dd0cecc66161fc93d7c9000da1");
pub const USDT: Address = address!("94b008aa00579c1307b0ef2c499ad98a8ce58e58");

/// Velodrome pools the scenarios exercise.
pub mod pools {
    use alloy::primitives::{Address, address};

    pub const WETH_USDC: Address = address!("79c912fef520be002c2b6e57ec4324e260f38e50");
    pub const USDC_DAI: Address = address!("4f7ebc19844259386dbddb7b2eb759eefc6f8353");
}

/// Canonical wrapped-native token per chain id.
pub fn wrapped_native(chain_id: u64) -> Option<Address> {
    match chain_id {
        1 => Some(address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")),
        10 => Some(WETH),
        137 => Some(address!("0d500b1d8e8ef31e21c99d1db9a6444d3adf1270")),
        250 => Some(address!("21be370d5312f44cb42ce377bc9b8a0cef1a4c83")),
        42161 => Some(address!("82af49447d8a07e3bd95bd0d56f35241523fbab1")),
        43114 => Some(address!("b31f66aa3c1e785363f0875a1b74e27b85fd66c7")),
        _ => None,
    }
}
