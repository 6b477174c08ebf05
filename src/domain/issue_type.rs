use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic issue category. Jira only knows numeric type ids, which are
/// specific to one site's configuration, so they are mapped onto this enum
/// through an [`IssueTypeMapping`] supplied at startup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Epic,
    Bug,
    Task,
    Story,
    Subtask,
    Debt,
    Improvement,
    NewFeature,
    Support,
    Enabler,
    Test,
    /// A type code missing from the mapping. Keeps the raw code for logging.
    #[serde(skip)]
    Unrecognized(String),
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueType::Epic => write!(f, "Epic"),
            IssueType::Bug => write!(f, "Bug"),
            IssueType::Task => write!(f, "Task"),
            IssueType::Story => write!(f, "Story"),
            IssueType::Subtask => write!(f, "Sub-task"),
            IssueType::Debt => write!(f, "Debt"),
            IssueType::Improvement => write!(f, "Improvement"),
            IssueType::NewFeature => write!(f, "New Feature"),
            IssueType::Support => write!(f, "Support"),
            IssueType::Enabler => write!(f, "Enabler"),
            IssueType::Test => write!(f, "Test"),
            IssueType::Unrecognized(code) => write!(f, "unrecognized type {code}"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized issue type code {code}")]
pub struct UnrecognizedIssueType {
    pub code: String,
}

/// Lookup table from a Jira issue type id to an [`IssueType`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueTypeMapping {
    codes: HashMap<String, IssueType>,
}

impl IssueTypeMapping {
    pub fn new(codes: HashMap<String, IssueType>) -> Self {
        Self { codes }
    }

    /// Resolves a type code. Jira flags sub-tasks separately from the type id,
    /// and that flag wins over whatever the code maps to.
    pub fn classify(&self, code: &str, is_subtask: bool) -> Result<IssueType, UnrecognizedIssueType> {
        if is_subtask {
            return Ok(IssueType::Subtask);
        }
        self.codes
            .get(code)
            .cloned()
            .ok_or_else(|| UnrecognizedIssueType {
                code: code.to_string(),
            })
    }
}
