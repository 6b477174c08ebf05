use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::comment::Comment;
use crate::domain::issue::{Issue, IssueStatus};
use crate::domain::issue_type::{IssueType, IssueTypeMapping};
use crate::domain::sprint::Sprint;
use crate::domain::user::User;
use crate::services::data_source::DataSourceError;

/// Larger values cannot be stored and are treated like garbage input.
const MAX_STORY_POINTS: f64 = u32::MAX as f64;

#[derive(Debug, Deserialize)]
pub struct ApiUser {
    #[serde(rename = "accountId")]
    pub account_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl ApiUser {
    pub fn into_user(self) -> User {
        User::new(self.account_id, self.display_name)
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiBoard {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiSprint {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(rename = "originBoardId")]
    pub origin_board_id: Option<u64>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "completeDate")]
    pub complete_date: Option<String>,
}

impl ApiSprint {
    pub fn into_sprint(self, queried_board_id: u64) -> Result<Sprint, DataSourceError> {
        let mut sprint = Sprint::new(
            self.id,
            self.origin_board_id.unwrap_or(queried_board_id),
            self.name,
        );
        sprint.closed = self.state == "closed";
        sprint.start_date = parse_timestamp_opt(self.start_date.as_deref())?;
        sprint.end_date = parse_timestamp_opt(self.end_date.as_deref())?;
        sprint.complete_date = parse_timestamp_opt(self.complete_date.as_deref())?;
        debug!(
            sprint = %sprint.name,
            start = ?sprint.start_date,
            end = ?sprint.end_date,
            complete = ?sprint.complete_date,
            "parsed sprint"
        );
        Ok(sprint)
    }
}

/// Decodes a value into one of the typed records above.
pub fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, DataSourceError> {
    serde_json::from_value(value).map_err(|err| DataSourceError::Parse(err.to_string()))
}

/// Turns Jira issue JSON into [`Issue`]s. Story points live in a custom
/// field and type ids are site specific, so both come from configuration.
pub struct IssueMapper {
    story_points_field_id: String,
    issue_types: IssueTypeMapping,
}

impl IssueMapper {
    pub fn new(story_points_field_id: impl Into<String>, issue_types: IssueTypeMapping) -> Self {
        Self {
            story_points_field_id: story_points_field_id.into(),
            issue_types,
        }
    }

    pub fn story_points_field_id(&self) -> &str {
        &self.story_points_field_id
    }

    pub fn map_issue(&self, issue: &Value) -> Result<Issue, DataSourceError> {
        let id = required_str(issue, "id")?;
        let key = required_str(issue, "key")?;
        let fields = issue
            .get("fields")
            .and_then(|value| value.as_object())
            .ok_or_else(|| DataSourceError::Parse(format!("issue {key} has no fields")))?;

        let mut mapped = Issue::new(id, key, self.map_issue_type(key, fields));
        mapped.title = get_field_string(fields, "summary").unwrap_or_default();
        mapped.status = get_field_status(fields);
        mapped.story_points = self.map_story_points(key, fields);
        mapped.assignee_id = fields
            .get("assignee")
            .and_then(|assignee| assignee.get("accountId"))
            .and_then(|value| value.as_str())
            .map(str::to_string);
        mapped.parent_id = fields
            .get("parent")
            .and_then(|parent| parent.get("id"))
            .and_then(|value| value.as_str())
            .map(str::to_string);
        if fields.get("resolution").is_some_and(|value| !value.is_null()) {
            mapped.resolved = true;
            mapped.resolution_date =
                parse_timestamp_opt(get_field_string(fields, "resolutiondate").as_deref())?;
        }
        mapped.subtask_ids = fields
            .get("subtasks")
            .and_then(|value| value.as_array())
            .map(|subtasks| {
                subtasks
                    .iter()
                    .filter_map(|subtask| subtask.get("id").and_then(|id| id.as_str()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        mapped.comments = map_comments(fields)?;

        debug!(
            issue = %mapped.key,
            issue_type = %mapped.issue_type,
            assignee = ?mapped.assignee_id,
            comments = mapped.comments.len(),
            "parsed issue"
        );
        Ok(mapped)
    }

    fn map_issue_type(&self, key: &str, fields: &Map<String, Value>) -> IssueType {
        let issue_type = fields.get("issuetype");
        let is_subtask = issue_type
            .and_then(|value| value.get("subtask"))
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        let code = issue_type
            .and_then(|value| value.get("id"))
            .and_then(|value| match value {
                Value::String(text) => Some(text.clone()),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            })
            .unwrap_or_default();

        self.issue_types
            .classify(&code, is_subtask)
            .unwrap_or_else(|err| {
                warn!(issue = %key, "{err}");
                IssueType::Unrecognized(err.code)
            })
    }

    fn map_story_points(&self, key: &str, fields: &Map<String, Value>) -> u32 {
        let points = match fields.get(&self.story_points_field_id) {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            _ => None,
        };
        match points {
            Some(value) if value.is_finite() && value >= 0.0 && value.round() <= MAX_STORY_POINTS => {
                value.round() as u32
            }
            Some(value) => {
                warn!(issue = %key, value, "story points are negative, too large or not a number, using 0");
                0
            }
            None => 0,
        }
    }
}

fn required_str<'a>(value: &'a Value, key: &str) -> Result<&'a str, DataSourceError> {
    value
        .get(key)
        .and_then(|value| value.as_str())
        .ok_or_else(|| DataSourceError::Parse(format!("missing '{key}'")))
}

fn get_field_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(|value| match value {
        Value::String(text) => Some(text.clone()),
        _ => None,
    })
}

fn get_field_status(fields: &Map<String, Value>) -> IssueStatus {
    let status = fields.get("status");
    let text = |key: &str| {
        status
            .and_then(|value| value.get(key))
            .and_then(|value| value.as_str())
            .unwrap_or_default()
            .to_string()
    };
    IssueStatus {
        id: text("id"),
        name: text("name"),
    }
}

fn map_comments(fields: &Map<String, Value>) -> Result<Vec<Comment>, DataSourceError> {
    let Some(comments) = fields
        .get("comment")
        .and_then(|value| value.get("comments"))
        .and_then(|value| value.as_array())
    else {
        return Ok(Vec::new());
    };

    comments
        .iter()
        .map(|comment| {
            let text = match comment.get("body") {
                Some(Value::String(text)) => text.clone(),
                Some(body @ Value::Object(_)) => adf_to_text(body),
                _ => String::new(),
            };
            let created = required_str(comment, "created")?;
            Ok(Comment {
                id: required_str(comment, "id")?.to_string(),
                author_id: comment
                    .get("author")
                    .and_then(|author| author.get("accountId"))
                    .and_then(|value| value.as_str())
                    .unwrap_or_default()
                    .to_string(),
                text: text.replace('\n', ""),
                published_date: parse_timestamp(created)?,
            })
        })
        .collect()
}

/// Parses Jira timestamps: `2024-01-05T10:00:00.000+0100` as well as RFC 3339.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, DataSourceError> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| DataSourceError::Parse(format!("invalid timestamp '{text}'")))
}

fn parse_timestamp_opt(value: Option<&str>) -> Result<Option<DateTime<Utc>>, DataSourceError> {
    value.map(parse_timestamp).transpose()
}

/// Flattens an Atlassian Document Format tree into plain text.
fn adf_to_text(value: &Value) -> String {
    let mut output = String::new();
    if let Some(obj) = value.as_object() {
        if let Some(content) = obj.get("content").and_then(|v| v.as_array()) {
            for node in content {
                output.push_str(&adf_to_text(node));
            }
        }
        if let Some(text) = obj.get("text").and_then(|v| v.as_str()) {
            output.push_str(text);
        }
        if obj.get("type").and_then(|v| v.as_str()) == Some("hardBreak") {
            output.push(' ');
        }
    } else if let Some(array) = value.as_array() {
        for node in array {
            output.push_str(&adf_to_text(node));
        }
    }
    output
}
