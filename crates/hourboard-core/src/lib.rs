//! hourboard-core - Core library for hourboard
//!
//! Hour-package consumption ledger: reconciles a company's contracted support
//! hours against consumption driven by project lifecycle state, across monthly
//! or multi-month packages, under standard or current-account carry-over, and
//! attributes overdrawn balances to the project that crossed the threshold.

pub mod alerts;
pub mod classifier;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ledger;
pub mod overage;
pub mod quota;
pub mod source;
pub mod store;
pub mod validity;

pub use hourboard_types::models;

pub use alerts::{alert_level, AlertLevel};
pub use classifier::classify;
pub use config::{AlertConfig, HourboardConfig, OutputFormat};
pub use dataset::DatasetLoader;
pub use error::{LedgerError, LoadError, SourceError};
pub use ledger::{parse_selector, Ledger};
pub use overage::attribute_overage;
pub use quota::get_quota;
pub use source::LedgerSource;
pub use store::InMemoryStore;
pub use validity::is_valid;
