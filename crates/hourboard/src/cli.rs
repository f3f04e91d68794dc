//! CLI output formatting
//!
//! Every command renders either a comfy-table for humans or pretty JSON.

use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use hourboard_core::models::{
    AggregateFigure, CompanyId, CompanyQuota, ConsumptionFigure, ExcessDetails, MonthYear,
    MonthlyBalance,
};
use hourboard_core::{AlertLevel, LedgerError, LoadError};
use rust_decimal::Decimal;
use serde::Serialize;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug)]
pub enum CliError {
    Ledger(LedgerError),
    Load(LoadError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Ledger(e) => {
                write!(f, "{}", e)?;
                if let Some(source) = std::error::Error::source(e) {
                    write!(f, ": {}", source)?;
                }
                if let Some(hint) = e.hint() {
                    write!(f, "\n  hint: {}", hint)?;
                }
                Ok(())
            }
            CliError::Load(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<LedgerError> for CliError {
    fn from(e: LedgerError) -> Self {
        CliError::Ledger(e)
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        CliError::Load(e)
    }
}

// ============================================================================
// JSON Reports
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FigureReport<'a> {
    company_id: &'a CompanyId,
    period: &'a str,
    alert: AlertLevel,
    #[serde(flatten)]
    figure: &'a ConsumptionFigure,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RollupReport<'a> {
    period: &'a str,
    #[serde(flatten)]
    aggregate: &'a AggregateFigure,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidityReport<'a> {
    company_id: &'a CompanyId,
    month: MonthYear,
    has_quota: bool,
    valid: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatementReport<'a> {
    company_id: &'a CompanyId,
    months: &'a [MonthlyBalance],
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

// ============================================================================
// Formatters
// ============================================================================

/// `2025-02` for a full selector, `all-time` otherwise
pub fn period_label(month: Option<u32>, year: Option<u32>) -> String {
    match (month, year) {
        (Some(m), Some(y)) => format!("{:04}-{:02}", y, m),
        _ => "all-time".to_string(),
    }
}

/// Format one company figure (human or JSON)
pub fn format_figure(
    company: &CompanyId,
    period: &str,
    figure: &ConsumptionFigure,
    level: AlertLevel,
    json: bool,
    no_color: bool,
) -> String {
    if json {
        return to_json(&FigureReport {
            company_id: company,
            period,
            alert: level,
            figure,
        });
    }

    let mut table = new_table(no_color, &["Metric", "Hours"]);
    let contracted_label = if figure.has_quota {
        "Contracted"
    } else {
        "Estimated (no contract)"
    };
    table.add_row(Row::from(vec![
        contracted_label.to_string(),
        format_hours(figure.contracted_hours),
    ]));
    if figure.has_quota {
        table.add_row(Row::from(vec![
            "Carried in".to_string(),
            format_hours(figure.carried_hours),
        ]));
    }
    table.add_row(Row::from(vec!["Consumed".to_string(), format_hours(figure.consumed_hours)]));
    table.add_row(vec![
        Cell::new("Remaining"),
        balance_cell(figure.remaining_hours, no_color),
    ]);
    table.add_row(Row::from(vec![
        "Usage".to_string(),
        figure
            .usage_pct()
            .map(|pct| format!("{}%", pct.round_dp(1).normalize()))
            .unwrap_or_else(|| "-".to_string()),
    ]));
    table.add_row(vec![Cell::new("Alert"), alert_cell(level, no_color)]);

    let mut lines = vec![format!("{} ({})", company, period), table.to_string()];
    if let Some(details) = &figure.excess_details {
        lines.push(overdrawn_summary(details));
    }
    lines.join("\n")
}

/// Format an overage walk (human or JSON)
pub fn format_excess(details: &ExcessDetails, json: bool, no_color: bool) -> String {
    if json {
        return to_json(details);
    }

    if details.traces.is_empty() {
        return "No consuming projects in scope".to_string();
    }

    let mut table = new_table(
        no_color,
        &["#", "Project", "Status", "Hours", "Cumulative", "Crossed"],
    );
    for (i, trace) in details.traces.iter().enumerate() {
        let crossed = if trace.is_exceeding_project {
            if no_color {
                Cell::new("yes")
            } else {
                Cell::new("yes").fg(Color::Red)
            }
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(truncate(&format!("{} ({})", trace.project_name, trace.project_id), 48)),
            Cell::new(trace.status.label()),
            Cell::new(format_hours(trace.consumed_hours)),
            Cell::new(format_hours(trace.cumulative_hours)),
            crossed,
        ]);
    }

    let mut lines = vec![table.to_string()];
    lines.push(format!(
        "Threshold: {}  Consumed: {}  Projects: {}",
        format_hours(details.contracted_hours),
        format_hours(details.total_consumed),
        details.project_count
    ));
    if details.exceeded_by > Decimal::ZERO {
        lines.push(overdrawn_summary(details));
    }
    lines.join("\n")
}

/// Format a portfolio rollup (human or JSON)
pub fn format_rollup(
    period: &str,
    aggregate: &AggregateFigure,
    json: bool,
    no_color: bool,
) -> String {
    if json {
        return to_json(&RollupReport { period, aggregate });
    }

    let mut table = new_table(no_color, &["Metric", "Value"]);
    table.add_row(Row::from(vec![
        "Contracted".to_string(),
        format_hours(aggregate.total_contracted),
    ]));
    table.add_row(Row::from(vec!["Consumed".to_string(), format_hours(aggregate.total_consumed)]));
    table.add_row(vec![
        Cell::new("Remaining"),
        balance_cell(aggregate.total_remaining, no_color),
    ]);
    table.add_row(Row::from(vec![
        "Companies with contract".to_string(),
        aggregate.companies_with_quota.to_string(),
    ]));
    table.add_row(Row::from(vec![
        "Companies without contract".to_string(),
        aggregate.companies_without_quota.to_string(),
    ]));

    format!("Portfolio ({})\n{}", period, table)
}

/// Format a validity check (human or JSON)
pub fn format_validity(quota: &CompanyQuota, month: MonthYear, valid: bool, json: bool) -> String {
    if json {
        return to_json(&ValidityReport {
            company_id: &quota.company_id,
            month,
            has_quota: quota.has_quota,
            valid,
        });
    }

    if !quota.has_quota {
        return format!("{}: no hour contract", quota.company_id);
    }
    let verdict = if valid { "applies to" } else { "does not apply to" };
    format!("{}: contract {} {}", quota.company_id, verdict, month)
}

/// Format a month-by-month statement (human or JSON)
pub fn format_statement(
    company: &CompanyId,
    rows: &[MonthlyBalance],
    json: bool,
    no_color: bool,
) -> String {
    if json {
        return to_json(&StatementReport {
            company_id: company,
            months: rows,
        });
    }

    if rows.is_empty() {
        return format!("No contract months for {}", company);
    }

    let mut table = new_table(
        no_color,
        &["Month", "Carry in", "Contracted", "Consumed", "Remaining", "Carry out"],
    );
    for row in rows {
        table.add_row(vec![
            Cell::new(row.month),
            Cell::new(format_hours(row.carry_in)),
            Cell::new(format_hours(row.contracted_hours)),
            Cell::new(format_hours(row.consumed_hours)),
            balance_cell(row.remaining_hours, no_color),
            Cell::new(format_hours(row.carry_out)),
        ]);
    }

    format!("{} statement\n{}", company, table)
}

// ============================================================================
// Utilities
// ============================================================================

fn new_table(no_color: bool, header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if no_color {
        table.set_header(header.to_vec());
    } else {
        table.set_header(header.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect::<Vec<_>>());
    }
    table
}

fn balance_cell(hours: Decimal, no_color: bool) -> Cell {
    let cell = Cell::new(format_hours(hours));
    if no_color {
        cell
    } else if hours < Decimal::ZERO {
        cell.fg(Color::Red)
    } else {
        cell.fg(Color::Green)
    }
}

fn alert_cell(level: AlertLevel, no_color: bool) -> Cell {
    let cell = Cell::new(level.label());
    if no_color {
        return cell;
    }
    match level {
        AlertLevel::Safe => cell.fg(Color::Green),
        AlertLevel::Warning => cell.fg(Color::Yellow),
        AlertLevel::Critical => cell.fg(Color::Red),
        AlertLevel::Exceeded => cell.fg(Color::Magenta),
    }
}

fn overdrawn_summary(details: &ExcessDetails) -> String {
    match details.exceeding_project() {
        Some(trace) => format!(
            "Overdrawn by {}; limit crossed by '{}' ({})",
            format_hours(details.exceeded_by),
            trace.project_name,
            trace.project_id
        ),
        None => format!("Overdrawn by {}", format_hours(details.exceeded_by)),
    }
}

fn format_hours(hours: Decimal) -> String {
    format!("{}h", hours.normalize())
}

fn truncate(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).collect::<String>() + "…"
    }
}

// ============================================================================
// Tests
// ============================================================================
