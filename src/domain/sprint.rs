use chrono::{DateTime, Utc};

use crate::domain::issue::Issue;

/// A sprint on a board. `end_date` is the planned end, `complete_date` is
/// when the sprint was actually closed; the two often differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprint {
	pub id: u64,
	pub board_id: u64,
	pub name: String,
	pub start_date: Option<DateTime<Utc>>,
	pub end_date: Option<DateTime<Utc>>,
	pub complete_date: Option<DateTime<Utc>>,
	pub closed: bool,
	pub issues: Vec<Issue>,
}

impl Sprint {
	pub fn new(id: u64, board_id: u64, name: impl Into<String>) -> Self {
		Self {
			id,
			board_id,
			name: name.into(),
			start_date: None,
			end_date: None,
			complete_date: None,
			closed: false,
			issues: Vec::new(),
		}
	}

	/// Returns the same sprint carrying `issues`.
	pub fn with_issues(self, issues: Vec<Issue>) -> Self {
		Self { issues, ..self }
	}

	/// True when `instant` lies strictly between the sprint's start and its
	/// planned end. A sprint missing either bound contains nothing.
	pub fn contains_strictly(&self, instant: DateTime<Utc>) -> bool {
		match (self.start_date, self.end_date) {
			(Some(start), Some(end)) => start < instant && instant < end,
			_ => false,
		}
	}
}
