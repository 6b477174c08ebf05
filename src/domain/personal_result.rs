use crate::domain::comment::Comment;
use crate::domain::issue::Issue;

/// What one person did in one sprint. Borrows the issues and comments from
/// the sprint it was computed from; one instance per (user, sprint) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalResult<'a> {
	pub user_id: String,
	pub sprint_id: u64,
	/// Assigned to the user and resolved before the sprint's planned end.
	pub finished: Vec<&'a Issue>,
	/// Assigned to the user but not resolved in time.
	pub not_finished: Vec<&'a Issue>,
	/// Comments by the user published inside the sprint window, in encounter order.
	pub comments_written: Vec<&'a Comment>,
	/// Issues assigned to someone else that the user commented on in the window.
	pub issues_reviewed: usize,
}

impl<'a> PersonalResult<'a> {
	pub fn new(user_id: impl Into<String>, sprint_id: u64) -> Self {
		Self {
			user_id: user_id.into(),
			sprint_id,
			finished: Vec::new(),
			not_finished: Vec::new(),
			comments_written: Vec::new(),
			issues_reviewed: 0,
		}
	}
}
