use crate::domain::sprint::Sprint;
use crate::services::report::{PersonSection, Report};

const SPRINT_RULE: &str = "=========================================================";
const PERSON_RULE: &str = "-----------------------------------------------------";

pub fn format_report(report: &Report, chars_per_line: usize) -> String {
    if report.is_empty() {
        return "No sprints matched the requested period.".to_string();
    }

    let mut lines = Vec::new();
    for section in report.sprints.values() {
        lines.push(SPRINT_RULE.to_string());
        lines.push(format!("Results for sprint: {}", section.name));
        lines.push(SPRINT_RULE.to_string());
        for person in section.people.values() {
            lines.extend(format_person(person, chars_per_line));
            lines.push(PERSON_RULE.to_string());
        }
    }
    lines.join("\n")
}

fn format_person(person: &PersonSection, chars_per_line: usize) -> Vec<String> {
    let summary = &person.summary;
    vec![
        format!("{} results:", person.name),
        format!("__Finished subtasks: {}", summary.subtasks),
        format!("__Finished issues: {}", summary.issues),
        format!("__Finished bugs: {}", summary.bugs),
        format!("__Finished others: {}", summary.other),
        format!("__Story Points: {}", summary.story_points_finished),
        format!("__Comments written: {}", summary.comment_count),
        format!(
            "__Comments lines: {} lines with {} total characters",
            summary.comment_lines(chars_per_line),
            summary.comment_char_total
        ),
        format!("__Issues reviewed: {}", summary.issues_reviewed),
    ]
}

pub fn format_sprint_list(sprints: &[Sprint]) -> String {
    if sprints.is_empty() {
        return "No sprints matched the requested period.".to_string();
    }

    let mut lines = Vec::new();
    lines.push("Sprint | Start | End | Complete".to_string());
    lines.push("-------|-------|-----|---------".to_string());
    for sprint in sprints {
        let date = |value: Option<chrono::DateTime<chrono::Utc>>| match value {
            Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => "n/a".to_string(),
        };
        lines.push(format!(
            "{} | {} | {} | {}",
            sprint.name,
            date(sprint.start_date),
            date(sprint.end_date),
            date(sprint.complete_date)
        ));
    }
    lines.join("\n")
}
