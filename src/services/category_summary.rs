use tracing::{info, warn};

use crate::domain::issue_type::IssueType;
use crate::domain::personal_result::PersonalResult;

pub const DEFAULT_COMMENT_CHARS_PER_LINE: usize = 125;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryBucket {
    Subtask,
    Issue,
    Bug,
    Other,
}

/// Bucket of a finished issue and whether its story points count towards
/// the person's total. Story points of stories stay with the story and are
/// not credited to whoever closes it.
pub fn classify(issue_type: &IssueType) -> (CategoryBucket, bool) {
    match issue_type {
        IssueType::Subtask => (CategoryBucket::Subtask, true),
        IssueType::Task | IssueType::Enabler | IssueType::Debt => (CategoryBucket::Issue, true),
        IssueType::Bug => (CategoryBucket::Bug, true),
        IssueType::Story => (CategoryBucket::Issue, false),
        IssueType::Epic
        | IssueType::Improvement
        | IssueType::NewFeature
        | IssueType::Support
        | IssueType::Test
        | IssueType::Unrecognized(_) => (CategoryBucket::Other, false),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategorySummary {
    pub subtasks: usize,
    pub issues: usize,
    pub bugs: usize,
    pub other: usize,
    pub story_points_finished: u32,
    pub comment_count: usize,
    pub comment_char_total: usize,
    pub issues_reviewed: usize,
}

impl CategorySummary {
    /// Rough size of the written comments in printed lines.
    pub fn comment_lines(&self, chars_per_line: usize) -> usize {
        self.comment_char_total
            .checked_div(chars_per_line)
            .unwrap_or(0)
    }
}

pub fn summarize(result: &PersonalResult<'_>) -> CategorySummary {
    let mut summary = CategorySummary {
        comment_count: result.comments_written.len(),
        comment_char_total: result
            .comments_written
            .iter()
            .map(|comment| comment.char_count())
            .sum(),
        issues_reviewed: result.issues_reviewed,
        ..CategorySummary::default()
    };

    for issue in &result.finished {
        let (bucket, counts_points) = classify(&issue.issue_type);
        match bucket {
            CategoryBucket::Subtask => summary.subtasks += 1,
            CategoryBucket::Issue => summary.issues += 1,
            CategoryBucket::Bug => summary.bugs += 1,
            CategoryBucket::Other => {
                if let IssueType::Unrecognized(code) = &issue.issue_type {
                    warn!(issue = %issue.key, %code, title = %issue.title, "unrecognized issue type counted as other");
                } else {
                    info!(issue = %issue.key, issue_type = %issue.issue_type, title = %issue.title, "counted as other");
                }
                summary.other += 1;
            }
        }
        if counts_points {
            summary.story_points_finished = summary.story_points_finished.saturating_add(issue.story_points);
        }
    }
    summary
}
