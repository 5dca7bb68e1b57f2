//! Fixed-point P&L arithmetic
//!
//! Money math stays in `Decimal` end to end so fee subtraction never drifts.

use crate::journal::Side;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Result of a single P&L calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlBreakdown {
    /// P&L before costs
    pub gross_pnl: Decimal,
    /// P&L after fees and commissions
    pub net_pnl: Decimal,
    /// Fees plus commissions
    pub total_fees: Decimal,
    /// Net P&L per unit of quantity
    pub pnl_per_contract: Decimal,
    /// Net P&L as a percentage of entry notional
    pub pnl_percentage: Decimal,
}

/// Calculate gross and net P&L for a round trip
///
/// Never fails: a non-positive quantity or notional yields 0 for the
/// derived ratios, and arithmetic overflow yields 0 for the affected field.
pub fn calculate_pnl(
    entry_price: Decimal,
    exit_price: Decimal,
    quantity: Decimal,
    direction: Side,
    fees: Option<Decimal>,
    commissions: Option<Decimal>,
) -> PnlBreakdown {
    let move_per_unit = match direction {
        Side::Long => exit_price.checked_sub(entry_price),
        Side::Short => entry_price.checked_sub(exit_price),
    };
    let gross_pnl = move_per_unit
        .and_then(|m| m.checked_mul(quantity))
        .unwrap_or(Decimal::ZERO);

    let total_fees = fees
        .unwrap_or(Decimal::ZERO)
        .checked_add(commissions.unwrap_or(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO);
    let net_pnl = gross_pnl.checked_sub(total_fees).unwrap_or(Decimal::ZERO);

    let pnl_per_contract = if quantity > Decimal::ZERO {
        net_pnl.checked_div(quantity).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    let notional = entry_price.checked_mul(quantity).unwrap_or(Decimal::ZERO);
    let pnl_percentage = if notional > Decimal::ZERO {
        net_pnl
            .checked_div(notional)
            .and_then(|r| r.checked_mul(dec!(100)))
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    PnlBreakdown {
        gross_pnl,
        net_pnl,
        total_fees,
        pnl_per_contract,
        pnl_percentage,
    }
}
