//! Money-flow edges for one month.
//!
//! Income categories feed a single hub, and the hub feeds every expense and
//! savings category. The details view lists these edges and `--json` prints
//! them next to the summary.

use finance_core::models::{MonthSummary, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;

/// Label of the node every income flows into.
pub const INCOME_HUB: &str = "Total income";

/// One edge of the flow diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoneyFlow {
    pub source: String,
    pub target: String,
    pub amount: Decimal,
    /// Type of the category at the non-hub end.
    pub kind: TransactionType,
}

/// Build the flow edges for `summary`.
///
/// Categories with a zero or negative amount are left out. Edges follow the
/// breakdown order: incomes first, then expenses, then savings.
pub fn money_flows(summary: &MonthSummary) -> Vec<MoneyFlow> {
    let mut flows = Vec::new();

    for item in summary.breakdown(TransactionType::Income) {
        if item.amount > Decimal::ZERO {
            flows.push(MoneyFlow {
                source: item.category.clone(),
                target: INCOME_HUB.to_string(),
                amount: item.amount,
                kind: TransactionType::Income,
            });
        }
    }

    for kind in [TransactionType::Expense, TransactionType::Savings] {
        for item in summary.breakdown(kind) {
            if item.amount > Decimal::ZERO {
                flows.push(MoneyFlow {
                    source: INCOME_HUB.to_string(),
                    target: item.category.clone(),
                    amount: item.amount,
                    kind,
                });
            }
        }
    }

    flows
}

/// Part of the hub that no outgoing edge accounts for (the balance, floored
/// at zero).
pub fn unallocated(summary: &MonthSummary) -> Decimal {
    summary.balance.max(Decimal::ZERO)
}
