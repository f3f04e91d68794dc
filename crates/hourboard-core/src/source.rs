//! Read-only data access consumed by the ledger
//!
//! The ledger never fetches, caches or persists on its own: every figure is a
//! pure function of what the source returns at call time. Retrying, pooling
//! and tenant filtering belong to the implementor.

use crate::error::SourceError;
use hourboard_types::{CompanyId, CompanyQuota, Project};
use std::sync::Arc;

/// Persistence collaborator for the ledger
pub trait LedgerSource {
    /// Billing configuration of a company.
    ///
    /// `Ok(None)` means the company record does not exist. A company that
    /// exists without a contract returns a quota with `has_quota = false`.
    fn fetch_company_quota(&self, company_id: &CompanyId)
        -> Result<Option<CompanyQuota>, SourceError>;

    /// Every project owned by one company, in any order
    fn fetch_company_projects(&self, company_id: &CompanyId) -> Result<Vec<Project>, SourceError>;

    /// Every project owned by any of the given companies, in any order
    fn fetch_projects_for_companies(
        &self,
        company_ids: &[CompanyId],
    ) -> Result<Vec<Project>, SourceError>;
}

impl<S: LedgerSource + ?Sized> LedgerSource for &S {
    fn fetch_company_quota(
        &self,
        company_id: &CompanyId,
    ) -> Result<Option<CompanyQuota>, SourceError> {
        (**self).fetch_company_quota(company_id)
    }

    fn fetch_company_projects(&self, company_id: &CompanyId) -> Result<Vec<Project>, SourceError> {
        (**self).fetch_company_projects(company_id)
    }

    fn fetch_projects_for_companies(
        &self,
        company_ids: &[CompanyId],
    ) -> Result<Vec<Project>, SourceError> {
        (**self).fetch_projects_for_companies(company_ids)
    }
}

impl<S: LedgerSource + ?Sized> LedgerSource for Arc<S> {
    fn fetch_company_quota(
        &self,
        company_id: &CompanyId,
    ) -> Result<Option<CompanyQuota>, SourceError> {
        (**self).fetch_company_quota(company_id)
    }

    fn fetch_company_projects(&self, company_id: &CompanyId) -> Result<Vec<Project>, SourceError> {
        (**self).fetch_company_projects(company_id)
    }

    fn fetch_projects_for_companies(
        &self,
        company_ids: &[CompanyId],
    ) -> Result<Vec<Project>, SourceError> {
        (**self).fetch_projects_for_companies(company_ids)
    }
}
