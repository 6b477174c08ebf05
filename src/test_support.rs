use chrono::{DateTime, Utc};

use crate::domain::comment::Comment;
use crate::domain::issue::Issue;
use crate::domain::issue_type::IssueType;
use crate::domain::sprint::Sprint;
use crate::domain::user::User;

pub fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .unwrap()
        .with_timezone(&Utc)
}

pub fn build_user(id: &str, name: &str) -> User {
    User::new(id, name)
}

pub fn build_sprint(id: u64, name: &str, start: &str, end: &str) -> Sprint {
    let mut sprint = Sprint::new(id, 1, name);
    sprint.start_date = Some(at(start));
    sprint.end_date = Some(at(end));
    sprint.complete_date = Some(at(end));
    sprint.closed = true;
    sprint
}

pub fn build_closed_sprint(id: u64, name: &str, start: &str, end: &str, complete: &str) -> Sprint {
    let mut sprint = build_sprint(id, name, start, end);
    sprint.complete_date = Some(at(complete));
    sprint
}

pub fn build_issue(key: &str, issue_type: IssueType, assignee: Option<&str>) -> Issue {
    let mut issue = Issue::new(format!("id-{key}"), key, issue_type);
    issue.title = format!("Title of {key}");
    issue.assignee_id = assignee.map(str::to_string);
    issue
}

pub fn build_resolved_issue(
    key: &str,
    issue_type: IssueType,
    assignee: &str,
    points: u32,
    resolved_at: &str,
) -> Issue {
    let mut issue = build_issue(key, issue_type, Some(assignee));
    issue.story_points = points;
    issue.resolved = true;
    issue.resolution_date = Some(at(resolved_at));
    issue
}

pub fn build_comment(id: &str, author: &str, text: &str, published: &str) -> Comment {
    Comment {
        id: id.to_string(),
        author_id: author.to_string(),
        text: text.to_string(),
        published_date: at(published),
    }
}
