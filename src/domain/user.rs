#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
	/// Jira account id, the identity key.
	pub id: String,
	pub name: String,
}

impl User {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
		}
	}
}
