//! Month-by-month balance fold
//!
//! Current-account packages fold every prior month's balance into the next
//! one. The fold is an explicit loop over the generated months of the
//! validity window, in strict chronological order.

use super::scope::ConsumptionScope;
use crate::classifier::consumed_total;
use crate::validity::first_valid_month;
use hourboard_types::{CarryModel, CompanyQuota, MonthYear, MonthlyBalance, Project};
use rust_decimal::Decimal;
use tracing::trace;

/// Amount a period's remaining balance propagates into the next one.
///
/// Standard packages only ever propagate a non-negative figure and the next
/// period resets anyway; current accounts propagate the signed balance.
pub fn carry_forward(model: CarryModel, remaining: Decimal) -> Decimal {
    match model {
        CarryModel::Standard => remaining.max(Decimal::ZERO),
        CarryModel::CurrentAccount => remaining,
    }
}

/// One row per month from the first valid month through `through`.
///
/// Period packages stop at their end month, so every row is a contract
/// month. Empty for companies without contract or when `through` precedes
/// the contract.
pub fn monthly_balances(
    quota: &CompanyQuota,
    projects: &[Project],
    through: MonthYear,
) -> Vec<MonthlyBalance> {
    let Some(first) = first_valid_month(quota) else {
        return Vec::new();
    };
    let last = match quota.effective_end() {
        Some(end) => through.min(MonthYear::from_date(end)),
        None => through,
    };

    let carries = quota.carries_balance();
    let mut carry = Decimal::ZERO;

    first
        .through(last)
        .map(|month| {
            let scope = ConsumptionScope::resolve(quota, Some(month));
            let consumed = consumed_total(projects.iter().filter(|p| scope.includes(p)));
            let carry_in = if carries { carry } else { Decimal::ZERO };
            let remaining = quota.contracted_hours + carry_in - consumed;
            let carry_out = carry_forward(quota.carry_model, remaining);
            carry = carry_out;

            trace!(
                company_id = %quota.company_id,
                month = %month,
                %carry_in,
                %consumed,
                %remaining,
                "Folded month"
            );

            MonthlyBalance {
                month,
                carry_in,
                contracted_hours: quota.contracted_hours,
                consumed_hours: consumed,
                remaining_hours: remaining,
                carry_out,
            }
        })
        .collect()
}

/// Balance carried into `month` from every prior month of the contract
pub fn carry_into(quota: &CompanyQuota, projects: &[Project], month: MonthYear) -> Decimal {
    if !quota.carries_balance() {
        return Decimal::ZERO;
    }
    monthly_balances(quota, projects, month.pred())
        .last()
        .map(|row| row.carry_out)
        .unwrap_or(Decimal::ZERO)
}
