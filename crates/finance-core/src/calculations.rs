//! Derived monthly metrics.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Share of income put aside: `total_savings / total_income`.
///
/// Returns zero when there is no positive income, so the rate is always
/// defined.
pub fn savings_rate(total_savings: Decimal, total_income: Decimal) -> Decimal {
    if total_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    total_savings
        .checked_div(total_income)
        .unwrap_or(Decimal::ZERO)
}

/// What is left once expenses and savings are taken out of income.
///
/// Saturates at the `Decimal` range instead of overflowing.
pub fn balance(total_income: Decimal, total_expense: Decimal, total_savings: Decimal) -> Decimal {
    total_income
        .saturating_sub(total_expense)
        .saturating_sub(total_savings)
}

/// Sum of `amounts`, saturating at `Decimal::MAX` / `Decimal::MIN`.
pub fn sum_amounts<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |total, amount| total.saturating_add(amount))
}

/// `part / whole * 100` as a float for charts; `0.0` if `whole` is not positive.
pub fn share_percent(part: Decimal, whole: Decimal) -> f64 {
    if whole <= Decimal::ZERO {
        return 0.0;
    }
    part.checked_div(whole)
        .map(|ratio| to_f64(ratio) * 100.0)
        .unwrap_or(0.0)
}

/// Lossy conversion used for bar widths and percentages.
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
