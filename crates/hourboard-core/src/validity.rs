//! Period validity checker

use hourboard_types::{CompanyQuota, MonthYear, PackageType};

/// Whether `month` falls inside the company's contracted validity window.
///
/// - no contract: never valid
/// - `monthly`: valid from the start month onwards, no upper bound
/// - `period`: valid when the first day of `month` is within
///   `[start_date, end_date]` (missing end date = unbounded)
pub fn is_valid(quota: &CompanyQuota, month: MonthYear) -> bool {
    if !quota.has_quota {
        return false;
    }
    let Some(start) = quota.start_date else {
        return false;
    };

    match quota.package_type {
        PackageType::Monthly => month >= MonthYear::from_date(start),
        PackageType::Period => {
            let first = month.first_day();
            first >= start && quota.end_date.map_or(true, |end| first <= end)
        }
    }
}

/// First month the contract applies to
pub fn first_valid_month(quota: &CompanyQuota) -> Option<MonthYear> {
    if !quota.has_quota {
        return None;
    }
    let start = quota.start_date?;
    let start_month = MonthYear::from_date(start);
    match quota.package_type {
        PackageType::Monthly => Some(start_month),
        // A period starting mid-month only becomes valid on the next first day
        PackageType::Period if start_month.first_day() < start => start_month.succ(),
        PackageType::Period => Some(start_month),
    }
}
