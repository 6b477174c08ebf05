use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::domain::issue_type::{IssueType, IssueTypeMapping};
use crate::services::category_summary::DEFAULT_COMMENT_CHARS_PER_LINE;
use crate::services::sprint_selector::ReportingPeriod;

pub const DEFAULT_STORY_POINTS_FIELD_ID: &str = "customfield_10125";
pub const DEFAULT_PAGE_SIZE: u32 = 200;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeriodRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub sprint_names: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub base_url: String,
    pub board_name: String,
    pub story_points_field_id: String,
    pub page_size: u32,
    pub comment_chars_per_line: usize,
    pub people: Vec<String>,
    pub period: PeriodRecord,
    #[serde(deserialize_with = "deserialize_type_codes")]
    pub issue_types: HashMap<String, IssueType>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            board_name: String::new(),
            story_points_field_id: DEFAULT_STORY_POINTS_FIELD_ID.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            comment_chars_per_line: DEFAULT_COMMENT_CHARS_PER_LINE,
            people: Vec::new(),
            period: PeriodRecord::default(),
            issue_types: HashMap::new(),
        }
    }
}

impl ReportConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents, path)
    }

    fn from_yaml_str(contents: &str, origin_path: &Path) -> Result<Self, ConfigError> {
        let config: ReportConfig =
            serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
                path: origin_path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(invalid("base_url is missing"));
        }
        if self.board_name.is_empty() {
            return Err(invalid("board_name is missing"));
        }
        if self.people.is_empty() {
            return Err(invalid("people must name at least one person"));
        }
        if self.comment_chars_per_line == 0 {
            return Err(invalid("comment_chars_per_line must be greater than zero"));
        }
        if self.page_size == 0 {
            return Err(invalid("page_size must be greater than zero"));
        }
        self.reporting_period()?;
        if self.issue_types.is_empty() {
            warn!("issue_types mapping is empty, every finished issue except sub-tasks is counted as other");
        }
        Ok(())
    }

    pub fn reporting_period(&self) -> Result<ReportingPeriod, ConfigError> {
        parse_period(&self.period)
    }

    pub fn issue_type_mapping(&self) -> IssueTypeMapping {
        IssueTypeMapping::new(self.issue_types.clone())
    }
}

pub struct ReportConfigParser;

impl ReportConfigParser {
    pub fn parse(&self, filepath: &str) -> Result<ReportConfig, ConfigError> {
        ReportConfig::from_yaml_file(filepath)
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidConfiguration(message.into())
}

fn parse_period(record: &PeriodRecord) -> Result<ReportingPeriod, ConfigError> {
    match record.kind.as_str() {
        "names" => {
            let names: BTreeSet<String> = record
                .sprint_names
                .clone()
                .unwrap_or_default()
                .into_iter()
                .collect();
            if names.is_empty() {
                return Err(invalid("period of type 'names' needs at least one sprint name"));
            }
            Ok(ReportingPeriod::Names(names))
        }
        "dates" => {
            let start = parse_period_bound(record.start_date.as_deref(), "start_date")?;
            let end = parse_period_bound(record.end_date.as_deref(), "end_date")?;
            if start >= end {
                return Err(invalid(format!(
                    "period start_date {start} is not before end_date {end}"
                )));
            }
            Ok(ReportingPeriod::Dates { start, end })
        }
        other => Err(invalid(format!(
            "unsupported period type '{other}', expected 'names' or 'dates'"
        ))),
    }
}

fn parse_period_bound(value: Option<&str>, field: &str) -> Result<DateTime<Utc>, ConfigError> {
    let text = value.ok_or_else(|| invalid(format!("period of type 'dates' needs {field}")))?;
    parse_period_timestamp(text)
        .ok_or_else(|| invalid(format!("period {field} '{text}' is not a valid timestamp")))
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`. Values without
/// an offset are read as UTC.
pub fn parse_period_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

// Type ids are numbers in Jira, so YAML keys may come as integers or strings.
fn deserialize_type_codes<'de, D>(deserializer: D) -> Result<HashMap<String, IssueType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: HashMap<serde_yaml::Value, IssueType> = HashMap::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, issue_type)| {
            let code = match key {
                serde_yaml::Value::String(text) => text,
                serde_yaml::Value::Number(number) => number.to_string(),
                other => {
                    return Err(serde::de::Error::custom(format!(
                        "issue type code must be a number or string, got {other:?}"
                    )));
                }
            };
            Ok((code, issue_type))
        })
        .collect()
}
