use chrono::{DateTime, Utc};

/// A comment as it was published on an issue. Edits are not tracked,
/// `published_date` is the creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
	pub id: String,
	pub author_id: String,
	pub text: String,
	pub published_date: DateTime<Utc>,
}

impl Comment {
	pub fn char_count(&self) -> usize {
		self.text.chars().count()
	}
}
