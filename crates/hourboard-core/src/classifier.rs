//! Project consumption classifier
//!
//! Binary rule: a project in planning draws nothing, any later state draws its
//! full estimate. Cancelled and commercial-proposal projects are not counted at
//! all, which is different from counting zero.

use hourboard_types::{Project, ProjectStatus};
use rust_decimal::Decimal;

/// Hours a project draws from its company's quota.
///
/// Returns `None` when the project must not appear in any sum.
pub fn classify(project: &Project) -> Option<Decimal> {
    match project.status {
        ProjectStatus::Cancelled | ProjectStatus::CommercialProposal => None,
        ProjectStatus::Planning => Some(Decimal::ZERO),
        _ => Some(project.estimate()),
    }
}

/// Projects that take part in consumption sums
pub fn counted<'a, I>(projects: I) -> impl Iterator<Item = &'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    projects.into_iter().filter(|p| !p.status.is_excluded())
}

/// Classifier sum over the counted projects
pub fn consumed_total<'a, I>(projects: I) -> Decimal
where
    I: IntoIterator<Item = &'a Project>,
{
    projects.into_iter().filter_map(classify).sum()
}

/// Sum of estimates over the counted projects (implicit quota of a company
/// without contract)
pub fn estimated_total<'a, I>(projects: I) -> Decimal
where
    I: IntoIterator<Item = &'a Project>,
{
    counted(projects).map(Project::estimate).sum()
}
