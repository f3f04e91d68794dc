//! Which projects count toward a figure

use crate::validity::is_valid;
use chrono::NaiveDate;
use hourboard_types::{CompanyQuota, MonthYear, PackageType, Project};

/// Consumption scope resolved from a quota and an optional month selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumptionScope {
    /// Every project of the company
    AllTime,
    /// Projects anchored within `[from, to]`, inclusive
    Window { from: NaiveDate, to: NaiveDate },
    /// The company is not under contract for the requested month
    OutsideContract,
}

impl ConsumptionScope {
    /// - no contract, or no selector: all time
    /// - monthly package: the selected calendar month
    /// - period package: from the package start through the end of the
    ///   selected month (the package balance as of that month)
    pub fn resolve(quota: &CompanyQuota, month: Option<MonthYear>) -> Self {
        let Some(month) = month else {
            return Self::AllTime;
        };
        if !quota.has_quota {
            return Self::AllTime;
        }
        if !is_valid(quota, month) {
            return Self::OutsideContract;
        }

        match (quota.package_type, quota.start_date) {
            (PackageType::Monthly, _) => Self::Window {
                from: month.first_day(),
                to: month.last_day(),
            },
            (PackageType::Period, Some(start)) => Self::Window {
                from: start,
                to: quota
                    .end_date
                    .map_or(month.last_day(), |end| end.min(month.last_day())),
            },
            (PackageType::Period, None) => Self::OutsideContract,
        }
    }

    pub fn includes(&self, project: &Project) -> bool {
        match self {
            Self::AllTime => true,
            Self::Window { from, to } => {
                let anchor = project.anchor_date();
                *from <= anchor && anchor <= *to
            }
            Self::OutsideContract => false,
        }
    }

    pub fn is_outside_contract(&self) -> bool {
        matches!(self, Self::OutsideContract)
    }
}
