//! Liquidity pool operations.

use super::{asset_name, list, text};
use crate::models::{AssetAmount, LiquidityPoolDeposit, LiquidityPoolWithdraw, Notification};

fn reserves(reserves: &[AssetAmount]) -> String {
	list(
		reserves
			.iter()
			.map(|reserve| format!("{} {}", reserve.amount, asset_name(&reserve.asset))),
	)
}

pub(super) fn deposit(deposit: &LiquidityPoolDeposit) -> Notification {
	Notification::new(
		"Stellar Liquidity Pool Deposit",
		format!(
			"Liquidity Pool Deposit. Liquidity Pool Id: {}, Reserves Max: {}, Max Price: {}, \
			 Min Price: {}, Reserves Deposited: {}, Shares Received: {}",
			text(&deposit.liquidity_pool_id),
			reserves(&deposit.reserves_max),
			text(&deposit.max_price),
			text(&deposit.min_price),
			reserves(&deposit.reserves_deposited),
			text(&deposit.shares_received)
		),
	)
}

pub(super) fn withdraw(withdraw: &LiquidityPoolWithdraw) -> Notification {
	Notification::new(
		"Stellar Liquidity Pool Withdraw",
		format!(
			"Liquidity Pool Withdraw. Liquidity Pool Id: {}, Reserves Min: {}, \
			 Reserves Received: {}, Shares: {}",
			text(&withdraw.liquidity_pool_id),
			reserves(&withdraw.reserves_min),
			reserves(&withdraw.reserves_received),
			text(&withdraw.shares)
		),
	)
}
