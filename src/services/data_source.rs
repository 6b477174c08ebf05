use thiserror::Error;

use crate::domain::issue::Issue;
use crate::domain::sprint::Sprint;
use crate::domain::user::User;

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("more than one user matches '{query}': {}", candidates.join(", "))]
    AmbiguousMatch {
        query: String,
        candidates: Vec<String>,
    },
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("parse error: {0}")]
    Parse(String),
}

/// Describes an interface for retrieving boards, sprints, issues and users.
#[async_trait::async_trait]
pub trait SprintDataSource: Send + Sync {
    async fn verify_credentials(&self) -> Result<(), DataSourceError>;

    async fn find_board(&self, board_name: &str) -> Result<u64, DataSourceError>;

    /// Sprints of the board with their own metadata only, `issues` empty.
    async fn fetch_board_sprints(&self, board_id: u64) -> Result<Vec<Sprint>, DataSourceError>;

    /// Every issue of the sprint with comments and sub-task ids populated.
    async fn fetch_sprint_issues(&self, sprint: &Sprint) -> Result<Vec<Issue>, DataSourceError>;

    async fn find_user(&self, display_name_fragment: &str) -> Result<User, DataSourceError>;
}
