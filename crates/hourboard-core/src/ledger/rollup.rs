//! Portfolio-wide rollup across companies
//!
//! Contracted and consumed come from different sources: contracted from the
//! quota records (or the implicit estimate for companies without contract),
//! consumed from the classifier over one batch of projects. They only meet at
//! the remaining-hours subtraction.

use super::scope::ConsumptionScope;
use super::{parse_selector, Ledger};
use crate::classifier::{consumed_total, estimated_total};
use crate::error::LedgerError;
use crate::quota::get_quota;
use crate::source::LedgerSource;
use hourboard_types::{AggregateFigure, CompanyId, Project};
use std::collections::{HashMap, HashSet};
use tracing::debug;

impl<S: LedgerSource> Ledger<S> {
    /// Sum figures over a set of companies.
    ///
    /// Duplicate ids count once. No carry-over is applied and the total
    /// remaining is never floored. A contract company outside its window for
    /// the month still counts as a company with quota but adds no hours.
    pub fn rollup(
        &self,
        company_ids: &[CompanyId],
        month: Option<u32>,
        year: Option<u32>,
    ) -> Result<AggregateFigure, LedgerError> {
        let selector = parse_selector(month, year)?;

        let mut seen = HashSet::new();
        let unique: Vec<CompanyId> = company_ids
            .iter()
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect();

        let quotas = unique
            .iter()
            .map(|id| get_quota(&self.source, id))
            .collect::<Result<Vec<_>, _>>()?;

        let projects = self
            .source
            .fetch_projects_for_companies(&unique)
            .map_err(LedgerError::data_access("fetch_projects_for_companies"))?;

        let mut by_company: HashMap<&CompanyId, Vec<&Project>> = HashMap::new();
        for project in &projects {
            by_company.entry(&project.company_id).or_default().push(project);
        }

        let mut aggregate = AggregateFigure::default();
        for quota in &quotas {
            let own = by_company
                .get(&quota.company_id)
                .map(Vec::as_slice)
                .unwrap_or_default();

            if quota.has_quota {
                aggregate.companies_with_quota += 1;
                let scope = ConsumptionScope::resolve(quota, selector);
                if scope.is_outside_contract() {
                    continue;
                }
                aggregate.total_contracted += quota.contracted_hours;
                aggregate.total_consumed +=
                    consumed_total(own.iter().copied().filter(|p| scope.includes(p)));
            } else {
                aggregate.total_contracted += estimated_total(own.iter().copied());
                aggregate.total_consumed += consumed_total(own.iter().copied());
                aggregate.companies_without_quota += 1;
            }
        }
        aggregate.total_remaining = aggregate.total_contracted - aggregate.total_consumed;

        debug!(
            companies = unique.len(),
            with_quota = aggregate.companies_with_quota,
            contracted = %aggregate.total_contracted,
            consumed = %aggregate.total_consumed,
            "Computed rollup"
        );
        Ok(aggregate)
    }
}
