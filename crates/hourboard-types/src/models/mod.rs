//! Data models for the hour-package ledger

pub mod figure;
pub mod ids;
pub mod period;
pub mod project;
pub mod quota;

pub use figure::{AggregateFigure, ConsumptionFigure, ExcessDetails, MonthlyBalance, OverageTrace};
pub use ids::{CompanyId, ProjectId};
pub use period::MonthYear;
pub use project::{Project, ProjectStatus};
pub use quota::{CarryModel, CompanyQuota, PackageType};
