//! Projects as seen by the ledger (read-only consumption sources)

use super::ids::{CompanyId, ProjectId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStatus {
    Planning,
    CommercialProposal,
    Cancelled,
    InProgress,
    Paused,
    Review,
    Completed,
    Delivered,
}

impl ProjectStatus {
    /// Statuses that never draw down hours and never appear in any sum
    pub fn is_excluded(&self) -> bool {
        matches!(self, Self::Cancelled | Self::CommercialProposal)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::CommercialProposal => "commercialProposal",
            Self::Cancelled => "cancelled",
            Self::InProgress => "inProgress",
            Self::Paused => "paused",
            Self::Review => "review",
            Self::Completed => "completed",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A project owned by a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: ProjectId,
    pub company_id: CompanyId,

    #[serde(default)]
    pub name: String,

    pub status: ProjectStatus,

    /// Estimated effort; absent is treated as zero
    #[serde(default)]
    pub estimated_hours: Option<Decimal>,

    /// Real start of work, when known
    #[serde(default)]
    pub actual_start_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Estimated hours with absent treated as zero
    pub fn estimate(&self) -> Decimal {
        self.estimated_hours.unwrap_or(Decimal::ZERO)
    }

    /// Temporal anchor: actual start (midnight UTC) if set, else creation time.
    ///
    /// Orders draw-downs for overage attribution and buckets projects into months.
    pub fn anchor(&self) -> DateTime<Utc> {
        self.actual_start_date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .unwrap_or(self.created_at)
    }

    /// Calendar date of the temporal anchor
    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor().date_naive()
    }
}
