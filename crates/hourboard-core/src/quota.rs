//! Company quota reader
//!
//! Pure read: fetches the billing configuration and checks record
//! invariants. No computation happens here.

use crate::error::{LedgerError, SourceError};
use crate::source::LedgerSource;
use hourboard_types::{CompanyId, CompanyQuota};
use rust_decimal::Decimal;
use tracing::debug;

/// Read a company's billing configuration.
///
/// Fails with [`LedgerError::CompanyNotFound`] when the company record does
/// not exist. A company without contract is returned with `has_quota = false`.
pub fn get_quota<S: LedgerSource>(
    source: &S,
    company_id: &CompanyId,
) -> Result<CompanyQuota, LedgerError> {
    let quota = source
        .fetch_company_quota(company_id)
        .map_err(LedgerError::data_access("fetch_company_quota"))?
        .ok_or_else(|| LedgerError::CompanyNotFound {
            company_id: company_id.clone(),
        })?;

    validate_quota(&quota).map_err(LedgerError::data_access("fetch_company_quota"))?;

    debug!(
        company_id = %company_id,
        has_quota = quota.has_quota,
        contracted = %quota.contracted_hours,
        package = ?quota.package_type,
        carry = ?quota.carry_model,
        "Quota loaded"
    );
    Ok(quota)
}

/// Check the invariants of a quota record
pub fn validate_quota(quota: &CompanyQuota) -> Result<(), SourceError> {
    let malformed =
        |reason: &str| SourceError::malformed("quota", quota.company_id.as_str(), reason);

    if !quota.has_quota {
        return Ok(());
    }
    if quota.contracted_hours < Decimal::ZERO {
        return Err(malformed("contracted hours must not be negative"));
    }
    let Some(start) = quota.start_date else {
        return Err(malformed("a contracted package needs a start date"));
    };
    if let Some(end) = quota.end_date {
        if end <= start {
            return Err(malformed("end date must be after start date"));
        }
    }
    Ok(())
}
