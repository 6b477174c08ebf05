use thiserror::Error;
use tracing::info;

use crate::commands::report_format::format_report;
use crate::services::data_source::{DataSourceError, SprintDataSource};
use crate::services::jira_api::{AuthData, JiraApiClient};
use crate::services::report::{build_report, collect_sprints, find_people};
use crate::services::report_config::{ConfigError, ReportConfig, ReportConfigParser};
use crate::services::report_yaml::serialize_report_to_yaml;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Jira request failed: {0}")]
    DataSource(#[from] DataSourceError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Loads the config and opens a verified Jira connection. The period is
/// validated while loading, so a bad config fails before any request.
pub async fn connect(config_path: &str) -> Result<(ReportConfig, JiraApiClient), CommandError> {
    let config = ReportConfigParser.parse(config_path)?;
    let auth = AuthData::from_env()?;
    let client = JiraApiClient::new(&config, auth)?;
    client.verify_credentials().await?;
    Ok((config, client))
}

pub async fn report_command(config_path: &str, output: Option<&str>) -> Result<(), CommandError> {
    let (config, client) = connect(config_path).await?;
    let period = config.reporting_period()?;

    let people = find_people(&client, &config.people).await?;
    let sprints = collect_sprints(&client, &config.board_name, &period).await?;
    let report = build_report(&people, &sprints);

    println!("{}", format_report(&report, config.comment_chars_per_line));

    if let Some(output) = output {
        let mut buffer = Vec::new();
        serialize_report_to_yaml(&mut buffer, &report, config.comment_chars_per_line)
            .and_then(|()| std::fs::write(output, buffer))
            .map_err(|source| CommandError::Write {
                path: output.to_string(),
                source,
            })?;
        info!(path = %output, "report written");
        println!("Report written to {output}");
    }
    Ok(())
}
