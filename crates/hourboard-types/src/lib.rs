//! hourboard-types - Shared data types for hourboard
//!
//! This crate contains pure data structures without heavy dependencies.
//! No I/O, no runtime - just serde-serializable types.
//!
//! Used by:
//! - hourboard-core (ledger engine)
//! - hourboard (CLI)

pub mod models;

pub use models::{
    AggregateFigure, CarryModel, CompanyId, CompanyQuota, ConsumptionFigure, ExcessDetails,
    MonthYear, MonthlyBalance, OverageTrace, PackageType, Project, ProjectId, ProjectStatus,
};
