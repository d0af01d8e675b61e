//! Shared Solidity contract bindings for all on-chain interactions.
//!
//! Uses alloy's `sol!` macro to generate type-safe ABI encoders/decoders
//! for the adapter under test and the token surfaces the flows touch.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IVelodromeIntegration {
        function deposit(
            address entryTokenAddress,
            uint256 entryTokenAmount,
            address poolAddress,
            address depositTokenAddress,
            uint256 minExitTokenAmount,
            address underlyingTarget,
            address targetDepositTokenAddress,
            address swapTarget,
            bytes calldata swapData,
            address affiliate
        ) external payable;

        function withdraw(
            address poolAddress,
            uint256 liquidityAmount,
            address exitTokenAddress,
            uint256 minExitTokenAmount,
            address underlyingTarget,
            address targetWithdrawTokenAddress,
            address swapTarget,
            bytes calldata swapData,
            address affiliate
        ) external;

        function getBalance(address token, address account) external view returns (uint256);

        function removeAssetReturn(
            address poolAddress,
            address targetTokenAddress,
            uint256 liquidityAmount
        ) external view returns (uint256);
    }

    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
    }

    #[sol(rpc)]
    interface IWETH {
        function deposit() external payable;
        function withdraw(uint256 amount) external;
        function balanceOf(address account) external view returns (uint256);
    }
}
