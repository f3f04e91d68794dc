//! Consumption ledger
//!
//! Combines the quota reader, the classifier and the validity checker into
//! the contracted / consumed / remaining triad for one company, applies the
//! carry-over policy, and explains overdrawn balances.
//!
//! The ledger holds no state besides its source: every call fetches, computes
//! and returns. Callers may run it concurrently for different companies.

mod carry;
mod rollup;
mod scope;

pub use carry::{carry_forward, carry_into, monthly_balances};
pub use scope::ConsumptionScope;

use crate::classifier::{consumed_total, estimated_total};
use crate::error::LedgerError;
use crate::overage::attribute_overage;
use crate::quota::get_quota;
use crate::source::LedgerSource;
use crate::validity;
use hourboard_types::{
    CompanyId, CompanyQuota, ConsumptionFigure, ExcessDetails, MonthYear, MonthlyBalance, Project,
};
use rust_decimal::Decimal;
use tracing::debug;

/// Validate an optional month/year pair.
///
/// Both absent selects all time; both present selects one calendar month.
/// Anything else is rejected before any data is read.
pub fn parse_selector(
    month: Option<u32>,
    year: Option<u32>,
) -> Result<Option<MonthYear>, LedgerError> {
    match (month, year) {
        (None, None) => Ok(None),
        (Some(m), Some(y)) => {
            if !(1..=12).contains(&m) {
                return Err(LedgerError::selector(month, year, "month must be between 1 and 12"));
            }
            i32::try_from(y)
                .ok()
                .and_then(|y| MonthYear::new(y, m))
                .map(Some)
                .ok_or_else(|| LedgerError::selector(month, year, "year is out of range"))
        }
        (Some(_), None) => Err(LedgerError::selector(month, year, "month given without year")),
        (None, Some(_)) => Err(LedgerError::selector(month, year, "year given without month")),
    }
}

/// Hour-package ledger over a [`LedgerSource`]
#[derive(Debug, Clone)]
pub struct Ledger<S> {
    source: S,
}

impl<S: LedgerSource> Ledger<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Whether the contract applies to `month`
    pub fn is_valid(quota: &CompanyQuota, month: MonthYear) -> bool {
        validity::is_valid(quota, month)
    }

    /// Contracted / consumed / remaining for a company, all time or for one month.
    ///
    /// A month outside the contract window yields an all-zero figure. When the
    /// balance is negative, `excess_details` names the project that crossed
    /// the threshold.
    pub fn compute_figure(
        &self,
        company_id: &CompanyId,
        month: Option<u32>,
        year: Option<u32>,
    ) -> Result<ConsumptionFigure, LedgerError> {
        let selector = parse_selector(month, year)?;
        let quota = get_quota(&self.source, company_id)?;
        let projects = self.fetch_projects(company_id)?;

        let figure = figure_for(&quota, &projects, selector);
        debug!(
            company_id = %company_id,
            period = %display_selector(selector),
            contracted = %figure.contracted_hours,
            consumed = %figure.consumed_hours,
            remaining = %figure.remaining_hours,
            carried = %figure.carried_hours,
            "Computed figure"
        );
        Ok(figure)
    }

    /// Overage walk for a company, all time or for one month.
    ///
    /// Returned even when the balance is not negative; in that case no project
    /// is flagged. A month outside the contract yields an empty report.
    pub fn attribute(
        &self,
        company_id: &CompanyId,
        month: Option<u32>,
        year: Option<u32>,
    ) -> Result<ExcessDetails, LedgerError> {
        let selector = parse_selector(month, year)?;
        let quota = get_quota(&self.source, company_id)?;
        let projects = self.fetch_projects(company_id)?;

        Ok(attribution_for(&quota, &projects, selector))
    }

    /// Month-by-month balances from the contract start through `through`
    pub fn statement(
        &self,
        company_id: &CompanyId,
        through: MonthYear,
    ) -> Result<Vec<MonthlyBalance>, LedgerError> {
        let quota = get_quota(&self.source, company_id)?;
        let projects = self.fetch_projects(company_id)?;

        let rows = monthly_balances(&quota, &projects, through);
        debug!(company_id = %company_id, through = %through, rows = rows.len(), "Built statement");
        Ok(rows)
    }

    fn fetch_projects(&self, company_id: &CompanyId) -> Result<Vec<Project>, LedgerError> {
        self.source
            .fetch_company_projects(company_id)
            .map_err(LedgerError::data_access("fetch_company_projects"))
    }
}

/// Pure figure computation over already-fetched data
pub fn figure_for(
    quota: &CompanyQuota,
    projects: &[Project],
    selector: Option<MonthYear>,
) -> ConsumptionFigure {
    if !quota.has_quota {
        let all: Vec<&Project> = projects.iter().collect();
        let contracted = estimated_total(projects);
        let consumed = consumed_total(projects);
        return finish(quota, &all, contracted, Decimal::ZERO, consumed);
    }

    let scope = ConsumptionScope::resolve(quota, selector);
    if scope.is_outside_contract() {
        return ConsumptionFigure::zero(true);
    }

    let in_scope: Vec<&Project> = projects.iter().filter(|p| scope.includes(p)).collect();
    let consumed = consumed_total(in_scope.iter().copied());
    let carried = match selector {
        Some(month) => carry_into(quota, projects, month),
        None => Decimal::ZERO,
    };

    finish(quota, &in_scope, quota.contracted_hours, carried, consumed)
}

fn finish(
    quota: &CompanyQuota,
    in_scope: &[&Project],
    contracted: Decimal,
    carried: Decimal,
    consumed: Decimal,
) -> ConsumptionFigure {
    let remaining = contracted + carried - consumed;
    let excess_details = (remaining < Decimal::ZERO)
        .then(|| attribute_overage(in_scope.iter().copied(), contracted + carried));

    ConsumptionFigure {
        contracted_hours: contracted,
        consumed_hours: consumed,
        remaining_hours: remaining,
        has_quota: quota.has_quota,
        carried_hours: carried,
        excess_details,
    }
}

/// Pure overage attribution over already-fetched data
pub fn attribution_for(
    quota: &CompanyQuota,
    projects: &[Project],
    selector: Option<MonthYear>,
) -> ExcessDetails {
    if !quota.has_quota {
        return attribute_overage(projects, estimated_total(projects));
    }

    let scope = ConsumptionScope::resolve(quota, selector);
    if scope.is_outside_contract() {
        return ExcessDetails::default();
    }

    let threshold = quota.contracted_hours
        + selector.map_or(Decimal::ZERO, |month| carry_into(quota, projects, month));
    attribute_overage(projects.iter().filter(|p| scope.includes(p)), threshold)
}

fn display_selector(selector: Option<MonthYear>) -> String {
    selector.map_or_else(|| "all-time".to_string(), |m| m.to_string())
}
