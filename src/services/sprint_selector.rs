use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::sprint::Sprint;

/// Which sprints a report covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportingPeriod {
    /// Sprints whose name is in the set, compared case-sensitively.
    Names(BTreeSet<String>),
    /// Sprints started after `start` and completed before `end`.
    Dates {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl ReportingPeriod {
    pub fn matches(&self, sprint: &Sprint) -> bool {
        match self {
            ReportingPeriod::Names(names) => names.contains(&sprint.name),
            ReportingPeriod::Dates { start, end } => {
                let started_inside = sprint.start_date.is_some_and(|date| date > *start);
                let completed_inside = sprint.complete_date.is_some_and(|date| date < *end);
                debug!(
                    sprint = %sprint.name,
                    started_inside,
                    completed_inside,
                    "checked sprint against date range"
                );
                started_inside && completed_inside
            }
        }
    }
}

/// Keeps the sprints of a board that fall into `period`, in board order.
///
/// A date range is a containment test on start and completion, not an
/// overlap test: a sprint still running at `end`, or one without a
/// completion date, does not qualify.
pub fn select_sprints(sprints: Vec<Sprint>, period: &ReportingPeriod) -> Vec<Sprint> {
    let selected: Vec<Sprint> = sprints
        .into_iter()
        .filter(|sprint| period.matches(sprint))
        .collect();
    for sprint in &selected {
        info!(sprint = %sprint.name, id = sprint.id, "sprint selected");
    }
    selected
}
