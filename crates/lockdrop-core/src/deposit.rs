//! Deposit flow for the yield-bearing wrapper token.
//!
//! L-tokens mint 1:1 against the underlying and redeem 1:1; yield accrues to
//! the wrapper balance afterwards and is not part of the quote.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositQuote {
    /// Underlying sent, in smallest units.
    pub deposited: u64,
    /// L-tokens received, in smallest units.
    pub minted: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawQuote {
    pub burned: u64,
    pub redeemed: u64,
}

/// Wrapper tokens minted for depositing `amount` of the underlying.
pub fn deposit_quote(amount: u64) -> DepositQuote {
    DepositQuote {
        deposited: amount,
        minted: amount,
    }
}

/// Underlying returned for burning `amount` wrapper tokens.
pub fn withdraw_quote(amount: u64) -> WithdrawQuote {
    WithdrawQuote {
        burned: amount,
        redeemed: amount,
    }
}
