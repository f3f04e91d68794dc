//! Ledger outputs: per-company figures, overage traces, rollups, statements.
//!
//! All values are computed on demand and never persisted.

use super::ids::ProjectId;
use super::period::MonthYear;
use super::project::ProjectStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Contracted / consumed / remaining triad for one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionFigure {
    pub contracted_hours: Decimal,
    pub consumed_hours: Decimal,
    /// Signed; negative means the balance is overdrawn
    pub remaining_hours: Decimal,
    pub has_quota: bool,
    /// Balance folded in from prior months (current-account packages only)
    #[serde(default)]
    pub carried_hours: Decimal,
    /// Present only when `remaining_hours < 0`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excess_details: Option<ExcessDetails>,
}

impl ConsumptionFigure {
    /// All-zero figure: the company is not under contract for the requested period
    pub fn zero(has_quota: bool) -> Self {
        Self {
            contracted_hours: Decimal::ZERO,
            consumed_hours: Decimal::ZERO,
            remaining_hours: Decimal::ZERO,
            has_quota,
            carried_hours: Decimal::ZERO,
            excess_details: None,
        }
    }

    /// Hours available this period (contract plus carried balance)
    pub fn available_hours(&self) -> Decimal {
        self.contracted_hours + self.carried_hours
    }

    pub fn is_overdrawn(&self) -> bool {
        self.remaining_hours < Decimal::ZERO
    }

    /// Consumed as a percentage of available hours.
    ///
    /// `None` when nothing is available (usage is undefined, not zero) or
    /// when the ratio does not fit in a `Decimal`.
    pub fn usage_pct(&self) -> Option<Decimal> {
        let available = self.available_hours();
        if available <= Decimal::ZERO {
            return None;
        }
        self.consumed_hours
            .checked_div(available)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }
}

/// One consuming project in an overage walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverageTrace {
    pub project_id: ProjectId,
    pub project_name: String,
    pub consumed_hours: Decimal,
    pub estimated_hours: Decimal,
    pub status: ProjectStatus,
    /// Running total up to and including this project, in temporal order
    pub cumulative_hours: Decimal,
    /// The single project whose inclusion first reached the threshold
    pub is_exceeding_project: bool,
}

/// Overage attribution report
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcessDetails {
    pub traces: Vec<OverageTrace>,
    /// `total_consumed - contracted_hours`, floored at zero
    pub exceeded_by: Decimal,
    /// Threshold the walk was measured against
    pub contracted_hours: Decimal,
    pub total_consumed: Decimal,
    pub project_count: usize,
}

impl ExcessDetails {
    /// The project flagged as causing the overage, if any
    pub fn exceeding_project(&self) -> Option<&OverageTrace> {
        self.traces.iter().find(|t| t.is_exceeding_project)
    }
}

/// Portfolio-wide totals across a set of companies
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateFigure {
    pub total_contracted: Decimal,
    pub total_consumed: Decimal,
    /// Unfloored
    pub total_remaining: Decimal,
    pub companies_with_quota: usize,
    pub companies_without_quota: usize,
}

/// One row of a month-by-month balance statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBalance {
    pub month: MonthYear,
    pub carry_in: Decimal,
    pub contracted_hours: Decimal,
    pub consumed_hours: Decimal,
    pub remaining_hours: Decimal,
    /// Amount propagated into the next month
    pub carry_out: Decimal,
}
