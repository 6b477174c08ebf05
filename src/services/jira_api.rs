use std::collections::HashMap;
use std::env;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::issue::Issue;
use crate::domain::sprint::Sprint;
use crate::domain::user::User;
use crate::services::data_source::{DataSourceError, SprintDataSource};
use crate::services::jira_mapping::{ApiBoard, ApiSprint, ApiUser, IssueMapper, decode};
use crate::services::report_config::ReportConfig;

const JIRA_API_PATH: &str = "rest/api/3";
const AGILE_API_PATH: &str = "rest/agile/1.0";

#[derive(Debug, Clone)]
pub struct AuthData {
    pub username: String,
    pub api_token: String,
}

impl AuthData {
    pub fn from_env() -> Result<Self, DataSourceError> {
        let username = env::var("JIRA_USERNAME").ok();
        let api_token = env::var("JIRA_API_TOKEN").ok();
        match (username, api_token) {
            (Some(username), Some(api_token)) => Ok(Self {
                username,
                api_token,
            }),
            _ => Err(DataSourceError::Unauthorized),
        }
    }
}

pub struct JiraApiClient {
    api_url: String,
    agile_url: String,
    page_size: u32,
    mapper: IssueMapper,
    auth: AuthData,
    client: Client,
}

impl JiraApiClient {
    pub fn new(config: &ReportConfig, auth: AuthData) -> Result<Self, DataSourceError> {
        let base_url = config.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(DataSourceError::UpstreamUnavailable(
                "base_url is empty".to_string(),
            ));
        }

        Ok(Self {
            api_url: format!("{base_url}/{JIRA_API_PATH}"),
            agile_url: format!("{base_url}/{AGILE_API_PATH}"),
            page_size: config.page_size,
            mapper: IssueMapper::new(
                config.story_points_field_id.clone(),
                config.issue_type_mapping(),
            ),
            auth,
            client: Client::new(),
        })
    }

    async fn fetch_json(
        &self,
        url: &str,
        params: &HashMap<&str, String>,
    ) -> Result<Value, DataSourceError> {
        debug!(%url, ?params, "GET");
        let response = self
            .client
            .get(url)
            .query(params)
            .basic_auth(
                self.auth.username.clone(),
                Some(self.auth.api_token.clone()),
            )
            .send()
            .await
            .map_err(|err| DataSourceError::UpstreamUnavailable(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DataSourceError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(DataSourceError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(DataSourceError::UpstreamUnavailable(format!(
                "{url} returned {status}"
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| DataSourceError::Parse(err.to_string()))
    }

    /// Collects `items_key` from every page of a paginated endpoint. Agile
    /// endpoints report `isLast`; issue searches report `total` instead.
    async fn fetch_all_pages(
        &self,
        url: &str,
        mut params: HashMap<&str, String>,
        items_key: &str,
    ) -> Result<Vec<Value>, DataSourceError> {
        let mut collected = Vec::new();
        let mut start_at: u64 = 0;

        loop {
            params.insert("startAt", start_at.to_string());
            let payload = self.fetch_json(url, &params).await?;

            let items = payload
                .get(items_key)
                .and_then(|value| value.as_array())
                .ok_or_else(|| DataSourceError::Parse(format!("{url} response has no '{items_key}'")))?;
            let received = items.len() as u64;
            collected.extend(items.iter().cloned());

            if let Some(is_last) = payload.get("isLast").and_then(|value| value.as_bool()) {
                if is_last || received == 0 {
                    break;
                }
                start_at += received;
                continue;
            }

            let page_start = payload.get("startAt").and_then(|value| value.as_u64());
            let max_results = payload.get("maxResults").and_then(|value| value.as_u64());
            let total = payload.get("total").and_then(|value| value.as_u64());

            if let (Some(page_start), Some(max_results), Some(total)) =
                (page_start, max_results, total)
            {
                let next_start_at = page_start.saturating_add(max_results);
                if next_start_at >= total || max_results == 0 {
                    break;
                }
                start_at = next_start_at;
                continue;
            }

            break;
        }

        Ok(collected)
    }
}

#[async_trait::async_trait]
impl SprintDataSource for JiraApiClient {
    async fn verify_credentials(&self) -> Result<(), DataSourceError> {
        let url = format!("{}/myself", self.api_url);
        self.fetch_json(&url, &HashMap::new()).await?;
        info!(user = %self.auth.username, url = %self.api_url, "connected to Jira");
        Ok(())
    }

    async fn find_board(&self, board_name: &str) -> Result<u64, DataSourceError> {
        let url = format!("{}/board", self.agile_url);
        let mut params = HashMap::new();
        params.insert("name", board_name.to_string());

        let boards = self.fetch_all_pages(&url, params, "values").await?;
        for board in boards {
            let board: ApiBoard = decode(board)?;
            if board.name == board_name {
                debug!(board = %board.name, id = board.id, "found board");
                return Ok(board.id);
            }
        }
        Err(DataSourceError::NotFound(format!("board '{board_name}'")))
    }

    async fn fetch_board_sprints(&self, board_id: u64) -> Result<Vec<Sprint>, DataSourceError> {
        let url = format!("{}/board/{board_id}/sprint", self.agile_url);
        let sprints = self.fetch_all_pages(&url, HashMap::new(), "values").await?;
        sprints
            .into_iter()
            .map(|sprint| decode::<ApiSprint>(sprint)?.into_sprint(board_id))
            .collect()
    }

    async fn fetch_sprint_issues(&self, sprint: &Sprint) -> Result<Vec<Issue>, DataSourceError> {
        info!(sprint = %sprint.name, "taking issues for the sprint");
        let url = format!(
            "{}/board/{}/sprint/{}/issue",
            self.agile_url, sprint.board_id, sprint.id
        );
        let fields = format!(
            "summary,status,issuetype,assignee,resolution,resolutiondate,parent,subtasks,comment,{}",
            self.mapper.story_points_field_id()
        );
        let mut params = HashMap::new();
        params.insert("maxResults", self.page_size.to_string());
        params.insert("fields", fields);

        let issues = self.fetch_all_pages(&url, params, "issues").await?;
        let mapped = issues
            .iter()
            .map(|issue| self.mapper.map_issue(issue))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(sprint = %sprint.name, count = mapped.len(), "fetched sprint issues");
        Ok(mapped)
    }

    async fn find_user(&self, display_name_fragment: &str) -> Result<User, DataSourceError> {
        let url = format!("{}/user/search", self.api_url);
        let mut params = HashMap::new();
        params.insert("query", display_name_fragment.to_string());

        let payload = self.fetch_json(&url, &params).await?;
        let mut users: Vec<ApiUser> = decode(payload)?;
        match users.len() {
            0 => Err(DataSourceError::NotFound(format!(
                "user matching '{display_name_fragment}'"
            ))),
            1 => {
                let user = users.remove(0).into_user();
                info!(query = %display_name_fragment, name = %user.name, id = %user.id, "person found");
                Ok(user)
            }
            _ => Err(DataSourceError::AmbiguousMatch {
                query: display_name_fragment.to_string(),
                candidates: users.into_iter().map(|user| user.display_name).collect(),
            }),
        }
    }
}
