use chrono::{DateTime, Utc};

use crate::domain::comment::Comment;
use crate::domain::issue_type::IssueType;

/// Workflow status as Jira names it (To Do, In Progress, Done, ...).
/// Only carried for display, classification never looks at it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueStatus {
	pub id: String,
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
	pub id: String,
	pub parent_id: Option<String>,
	pub issue_type: IssueType,
	pub key: String,
	pub title: String,
	pub assignee_id: Option<String>,
	pub status: IssueStatus,
	pub story_points: u32,
	pub resolved: bool,
	/// Only meaningful when `resolved` is set.
	pub resolution_date: Option<DateTime<Utc>>,
	pub subtask_ids: Vec<String>,
	pub comments: Vec<Comment>,
}

impl Issue {
	pub fn new(id: impl Into<String>, key: impl Into<String>, issue_type: IssueType) -> Self {
		Self {
			id: id.into(),
			parent_id: None,
			issue_type,
			key: key.into(),
			title: String::new(),
			assignee_id: None,
			status: IssueStatus::default(),
			story_points: 0,
			resolved: false,
			resolution_date: None,
			subtask_ids: Vec::new(),
			comments: Vec::new(),
		}
	}

	pub fn is_assigned_to(&self, user_id: &str) -> bool {
		self.assignee_id.as_deref() == Some(user_id)
	}

	/// True when the issue is resolved and its resolution happened strictly
	/// before `instant`. A resolved issue without a resolution date never is.
	pub fn is_resolved_before(&self, instant: DateTime<Utc>) -> bool {
		self.resolved
			&& self
				.resolution_date
				.is_some_and(|resolved_at| resolved_at < instant)
	}
}
