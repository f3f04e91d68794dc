//! Overage attribution
//!
//! Replays a company's draw-downs in the order they happened and points at the
//! project whose addition first pushed the running total to the threshold.

use crate::classifier::{classify, counted};
use hourboard_types::{ExcessDetails, OverageTrace, Project};
use rust_decimal::Decimal;

/// Walk the consuming projects in temporal order against `threshold`.
///
/// Excluded and zero-consumption projects are dropped. Order is the project
/// anchor (actual start, else creation time), ties broken by project id.
/// The flagged project is the one where the running total moves from strictly
/// below the threshold to at-or-above it; at most one is flagged, and none when
/// the threshold is zero or negative.
pub fn attribute_overage<'a, I>(projects: I, threshold: Decimal) -> ExcessDetails
where
    I: IntoIterator<Item = &'a Project>,
{
    let mut contributing: Vec<(&Project, Decimal)> = counted(projects)
        .filter_map(|p| classify(p).map(|hours| (p, hours)))
        .filter(|(_, hours)| *hours > Decimal::ZERO)
        .collect();

    contributing.sort_by(|(a, _), (b, _)| {
        a.anchor()
            .cmp(&b.anchor())
            .then_with(|| a.project_id.cmp(&b.project_id))
    });

    let mut cumulative = Decimal::ZERO;
    let mut flagged = false;
    let traces: Vec<OverageTrace> = contributing
        .into_iter()
        .map(|(project, hours)| {
            let before = cumulative;
            cumulative += hours;
            let crosses = !flagged && before < threshold && cumulative >= threshold;
            flagged |= crosses;

            OverageTrace {
                project_id: project.project_id.clone(),
                project_name: project.name.clone(),
                consumed_hours: hours,
                estimated_hours: project.estimate(),
                status: project.status,
                cumulative_hours: cumulative,
                is_exceeding_project: crosses,
            }
        })
        .collect();

    ExcessDetails {
        exceeded_by: (cumulative - threshold).max(Decimal::ZERO),
        contracted_hours: threshold,
        total_consumed: cumulative,
        project_count: traces.len(),
        traces,
    }
}
