use std::io::{self, Write};

use serde::Serialize;

use crate::services::report::Report;

#[derive(Serialize)]
struct SprintRecord {
    sprint: String,
    sprint_id: u64,
    people: Vec<PersonRecord>,
}

#[derive(Serialize)]
struct PersonRecord {
    name: String,
    account_id: String,
    finished_subtasks: usize,
    finished_issues: usize,
    finished_bugs: usize,
    finished_other: usize,
    story_points: u32,
    comments_written: usize,
    comment_lines: usize,
    comment_characters: usize,
    issues_reviewed: usize,
}

pub fn serialize_report_to_yaml<W: Write>(
    writer: &mut W,
    report: &Report,
    chars_per_line: usize,
) -> io::Result<()> {
    let records: Vec<SprintRecord> = report
        .sprints
        .iter()
        .map(|(sprint_id, section)| SprintRecord {
            sprint: section.name.clone(),
            sprint_id: *sprint_id,
            people: section
                .people
                .iter()
                .map(|(account_id, person)| PersonRecord {
                    name: person.name.clone(),
                    account_id: account_id.clone(),
                    finished_subtasks: person.summary.subtasks,
                    finished_issues: person.summary.issues,
                    finished_bugs: person.summary.bugs,
                    finished_other: person.summary.other,
                    story_points: person.summary.story_points_finished,
                    comments_written: person.summary.comment_count,
                    comment_lines: person.summary.comment_lines(chars_per_line),
                    comment_characters: person.summary.comment_char_total,
                    issues_reviewed: person.summary.issues_reviewed,
                })
                .collect(),
        })
        .collect();

    let yaml = serde_yaml::to_string(&records).map_err(io::Error::other)?;
    writer.write_all(yaml.as_bytes())
}
