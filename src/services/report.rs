use indexmap::IndexMap;
use tracing::{info, warn};

use crate::domain::sprint::Sprint;
use crate::domain::user::User;
use crate::services::attribution::attribute;
use crate::services::category_summary::{CategorySummary, summarize};
use crate::services::data_source::{DataSourceError, SprintDataSource};
use crate::services::sprint_selector::{ReportingPeriod, select_sprints};

#[derive(Debug, Clone, PartialEq)]
pub struct PersonSection {
    pub name: String,
    pub summary: CategorySummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SprintSection {
    pub name: String,
    /// Keyed by user id, in the order people were requested.
    pub people: IndexMap<String, PersonSection>,
}

/// Per sprint, per person summaries of one reporting run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Keyed by sprint id, in selection order.
    pub sprints: IndexMap<u64, SprintSection>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.sprints.is_empty()
    }
}

/// Looks up every configured person. The first failed lookup aborts. Names
/// that resolve to an account already found are skipped.
pub async fn find_people(
    source: &dyn SprintDataSource,
    names: &[String],
) -> Result<Vec<User>, DataSourceError> {
    let mut people: Vec<User> = Vec::with_capacity(names.len());
    for name in names {
        let user = source.find_user(name).await?;
        if let Some(known) = people.iter().find(|known| known.id == user.id) {
            warn!(query = %name, id = %user.id, name = %known.name, "person already listed, skipping duplicate");
            continue;
        }
        people.push(user);
    }
    Ok(people)
}

/// Selects the board's sprints for `period` without fetching their issues.
pub async fn select_board_sprints(
    source: &dyn SprintDataSource,
    board_name: &str,
    period: &ReportingPeriod,
) -> Result<Vec<Sprint>, DataSourceError> {
    let board_id = source.find_board(board_name).await?;
    let sprints = source.fetch_board_sprints(board_id).await?;
    let selected = select_sprints(sprints, period);
    if selected.is_empty() {
        warn!(board = %board_name, ?period, "no sprints match the requested period");
    }
    Ok(selected)
}

/// Selects the board's sprints for `period` and populates their issues.
pub async fn collect_sprints(
    source: &dyn SprintDataSource,
    board_name: &str,
    period: &ReportingPeriod,
) -> Result<Vec<Sprint>, DataSourceError> {
    let selected = select_board_sprints(source, board_name, period).await?;
    let mut populated = Vec::with_capacity(selected.len());
    for sprint in selected {
        let issues = source.fetch_sprint_issues(&sprint).await?;
        populated.push(sprint.with_issues(issues));
    }
    Ok(populated)
}

pub fn build_report(people: &[User], sprints: &[Sprint]) -> Report {
    let mut report = Report::default();
    for sprint in sprints {
        let mut section = SprintSection {
            name: sprint.name.clone(),
            people: IndexMap::with_capacity(people.len()),
        };
        for person in people {
            let result = attribute(person, sprint);
            section.people.insert(
                person.id.clone(),
                PersonSection {
                    name: person.name.clone(),
                    summary: summarize(&result),
                },
            );
        }
        report.sprints.insert(sprint.id, section);
    }
    info!(sprints = report.sprints.len(), people = people.len(), "finished counting results");
    report
}
