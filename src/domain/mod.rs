pub mod comment;
pub mod issue;
pub mod issue_type;
pub mod personal_result;
pub mod sprint;
pub mod user;
