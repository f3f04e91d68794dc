//! Company billing configuration (support-hours package)

use super::ids::CompanyId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a contracted package renews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PackageType {
    /// Renews every calendar month from `start_date`, indefinitely
    #[default]
    Monthly,
    /// Valid only between `start_date` and `end_date`, inclusive
    Period,
}

/// What happens to unused (or over-used) hours at the end of a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CarryModel {
    /// Balance resets to the contracted amount every period
    #[default]
    Standard,
    /// Balance (positive or negative) rolls into the next period
    CurrentAccount,
}

/// Billing configuration of one company.
///
/// A company without an explicit contract is still represented, with
/// `has_quota = false`; its implicit quota is the estimate of its own work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyQuota {
    pub company_id: CompanyId,

    /// Whether the company has an explicit hour contract
    #[serde(default)]
    pub has_quota: bool,

    /// Hours per contractual unit (per month for `monthly`, whole window for `period`)
    #[serde(default)]
    pub contracted_hours: Decimal,

    #[serde(default)]
    pub package_type: PackageType,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Ignored for `monthly` packages
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub carry_model: CarryModel,
}

impl CompanyQuota {
    /// Quota value for a company with no explicit contract
    pub fn absent(company_id: CompanyId) -> Self {
        Self {
            company_id,
            has_quota: false,
            contracted_hours: Decimal::ZERO,
            package_type: PackageType::Monthly,
            start_date: None,
            end_date: None,
            carry_model: CarryModel::Standard,
        }
    }

    /// Whether unused hours roll forward between months.
    ///
    /// Only monthly packages have successive periods to carry between.
    pub fn carries_balance(&self) -> bool {
        self.has_quota
            && self.carry_model == CarryModel::CurrentAccount
            && self.package_type == PackageType::Monthly
    }

    /// Upper bound of the validity window (`None` = open-ended)
    pub fn effective_end(&self) -> Option<NaiveDate> {
        match self.package_type {
            PackageType::Monthly => None,
            PackageType::Period => self.end_date,
        }
    }
}
