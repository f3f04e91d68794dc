//! Balance alert levels for dashboard badges

use crate::config::AlertConfig;
use hourboard_types::ConsumptionFigure;
use rust_decimal::Decimal;
use serde::Serialize;

/// Alert level based on hour usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Usage < warning threshold (green)
    Safe,
    /// Usage >= warning threshold (yellow)
    Warning,
    /// Usage >= critical threshold (red)
    Critical,
    /// Usage >= 100% or balance overdrawn (magenta)
    Exceeded,
}

impl AlertLevel {
    pub fn label(&self) -> &'static str {
        match self {
            AlertLevel::Safe => "safe",
            AlertLevel::Warning => "warning",
            AlertLevel::Critical => "critical",
            AlertLevel::Exceeded => "exceeded",
        }
    }
}

/// Alert level of a figure against the configured thresholds.
///
/// A figure with nothing available is safe while nothing is consumed.
pub fn alert_level(figure: &ConsumptionFigure, config: &AlertConfig) -> AlertLevel {
    if figure.is_overdrawn() {
        return AlertLevel::Exceeded;
    }
    match figure.usage_pct() {
        Some(pct) => determine_alert_level(pct, config),
        None if figure.consumed_hours > Decimal::ZERO => AlertLevel::Exceeded,
        None => AlertLevel::Safe,
    }
}

/// Determine alert level from usage percentage and thresholds
fn determine_alert_level(usage_pct: Decimal, config: &AlertConfig) -> AlertLevel {
    if usage_pct >= Decimal::ONE_HUNDRED {
        AlertLevel::Exceeded
    } else if usage_pct >= config.critical_threshold {
        AlertLevel::Critical
    } else if usage_pct >= config.warning_threshold {
        AlertLevel::Warning
    } else {
        AlertLevel::Safe
    }
}
