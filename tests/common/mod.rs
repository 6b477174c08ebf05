use std::collections::HashMap;
use std::net::SocketAddr;

use assert_fs::prelude::*;
use serde_json::{Value, json};
use warp::Filter;
use warp::http::StatusCode;

fn user(account_id: &str, display_name: &str) -> Value {
    json!({ "accountId": account_id, "displayName": display_name })
}

fn issue(
    id: &str,
    key: &str,
    type_id: &str,
    subtask: bool,
    assignee: Option<&str>,
    points: Option<u32>,
    resolved_at: Option<&str>,
    comments: Vec<Value>,
) -> Value {
    let status = if resolved_at.is_some() { "Done" } else { "In Progress" };
    json!({
        "id": id,
        "key": key,
        "fields": {
            "summary": format!("Summary of {key}"),
            "customfield_10125": points,
            "issuetype": { "id": type_id, "subtask": subtask },
            "assignee": assignee.map(|account_id| json!({ "accountId": account_id })),
            "status": { "id": "3", "name": status },
            "resolution": resolved_at.map(|_| json!({ "name": "Done" })),
            "resolutiondate": resolved_at,
            "subtasks": [],
            "comment": { "comments": comments }
        }
    })
}

fn comment(id: &str, author: &str, body: &str, created: &str) -> Value {
    json!({
        "id": id,
        "author": { "accountId": author },
        "body": body,
        "created": created
    })
}

/// Sprint 9 runs 2024-01-01..2024-01-14 and holds five issues, served in two
/// pages of three and two.
fn sprint_9_issues() -> Vec<Value> {
    vec![
        issue(
            "101",
            "X-1",
            "10004",
            false,
            Some("alice-id"),
            Some(3),
            Some("2024-01-13T10:00:00.000+0000"),
            vec![comment("c1", "alice-id", "Fixed the crash", "2024-01-13T09:00:00.000+0000")],
        ),
        issue(
            "102",
            "Y-1",
            "10000",
            false,
            Some("bob-id"),
            Some(5),
            None,
            vec![
                comment("c2", "alice-id", "Looks good to me", "2024-01-05T00:00:00.000+0000"),
                comment("c3", "alice-id", "Written after the sprint", "2024-01-20T00:00:00.000+0000"),
            ],
        ),
        issue(
            "103",
            "Z-1",
            "10003",
            false,
            Some("bob-id"),
            Some(8),
            Some("2024-01-10T12:00:00.000+0000"),
            vec![],
        ),
        issue(
            "104",
            "W-1",
            "10777",
            false,
            Some("bob-id"),
            Some(1),
            Some("2024-01-10T12:00:00.000+0000"),
            vec![],
        ),
        issue(
            "105",
            "S-1",
            "10001",
            true,
            Some("alice-id"),
            Some(2),
            Some("2024-01-12T08:00:00.000+0000"),
            vec![],
        ),
    ]
}

/// Board sprints come in two pages so callers have to follow `isLast`.
fn sprints_page(start_at: usize) -> Value {
    if start_at == 0 {
        return json!({
            "maxResults": 2,
            "startAt": 0,
            "isLast": false,
            "values": [
                {
                    "id": 8,
                    "state": "closed",
                    "name": "Sprint 8",
                    "startDate": "2023-12-18T00:00:00.000Z",
                    "endDate": "2023-12-31T00:00:00.000Z",
                    "completeDate": "2023-12-31T10:00:00.000Z",
                    "originBoardId": 5
                },
                {
                    "id": 9,
                    "state": "closed",
                    "name": "Sprint 9",
                    "startDate": "2024-01-01T00:00:00.000Z",
                    "endDate": "2024-01-14T00:00:00.000Z",
                    "completeDate": "2024-01-14T10:00:00.000Z",
                    "originBoardId": 5
                }
            ]
        });
    }
    json!({
        "maxResults": 2,
        "startAt": start_at,
        "isLast": true,
        "values": [
            {
                "id": 10,
                "state": "future",
                "name": "Sprint 10",
                "originBoardId": 5
            },
            {
                "id": 11,
                "state": "closed",
                "name": "Sprint 11",
                "startDate": "2024-01-15T00:00:00.000Z",
                "endDate": "2024-01-28T00:00:00.000Z",
                "completeDate": "2024-01-28T10:00:00.000Z",
                "originBoardId": 5
            }
        ]
    })
}

fn start_at_param(query: &HashMap<String, String>) -> usize {
    query
        .get("startAt")
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

/// Starts a mock Jira on an ephemeral port and returns its address.
pub fn spawn_mock_jira() -> SocketAddr {
    let myself = warp::path!("rest" / "api" / "3" / "myself")
        .and(warp::get())
        .map(|| warp::reply::json(&user("me-id", "Mock User")));

    let user_search = warp::path!("rest" / "api" / "3" / "user" / "search")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(|query: HashMap<String, String>| {
            let users = match query.get("query").map(String::as_str) {
                Some("alice") => vec![user("alice-id", "Alice Liddell")],
                Some("bob") => vec![user("bob-id", "Bob Builder")],
                Some("sam") => vec![user("sam-1", "Sam Smith"), user("sam-2", "Sam Jones")],
                _ => vec![],
            };
            warp::reply::json(&users)
        });

    let boards = warp::path!("rest" / "agile" / "1.0" / "board")
        .and(warp::get())
        .map(|| {
            warp::reply::json(&json!({
                "maxResults": 50,
                "startAt": 0,
                "isLast": true,
                "values": [
                    { "id": 4, "name": "Team board (old)" },
                    { "id": 5, "name": "Team board" }
                ]
            }))
        });

    let board_sprints = warp::path!("rest" / "agile" / "1.0" / "board" / u64 / "sprint")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(|_board_id: u64, query: HashMap<String, String>| {
            warp::reply::json(&sprints_page(start_at_param(&query)))
        });

    let sprint_issues = warp::path!("rest" / "agile" / "1.0" / "board" / u64 / "sprint" / u64 / "issue")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(|_board_id: u64, sprint_id: u64, query: HashMap<String, String>| {
            let issues = if sprint_id == 9 { sprint_9_issues() } else { vec![] };
            let total = issues.len();
            let start_at = start_at_param(&query);
            let page: Vec<Value> = issues.into_iter().skip(start_at).take(3).collect();
            warp::reply::json(&json!({
                "startAt": start_at,
                "maxResults": 3,
                "total": total,
                "issues": page
            }))
        });

    // Base urls under these prefixes answer every request with a fixed status.
    let forbidden = warp::path("forbidden")
        .and(warp::path::tail())
        .map(|_| warp::reply::with_status("denied", StatusCode::FORBIDDEN));
    let broken = warp::path("broken")
        .and(warp::path::tail())
        .map(|_| warp::reply::with_status("oops", StatusCode::INTERNAL_SERVER_ERROR));

    let routes = myself
        .or(user_search)
        .or(boards)
        .or(board_sprints)
        .or(sprint_issues)
        .or(forbidden)
        .or(broken);
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

/// Writes a report config pointing at `base_url` with the given people and
/// `period` block (already indented YAML).
pub fn write_config(base_url: &str, people: &[&str], period: &str) -> assert_fs::NamedTempFile {
    let people = people
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let config_yaml = format!(
        r#"
base_url: {base_url}
board_name: Team board
story_points_field_id: customfield_10125
comment_chars_per_line: 10
people: [{people}]
period:
{period}
issue_types:
  10004: bug
  10000: task
  10003: story
  10001: subtask
"#
    );

    let config_file = assert_fs::NamedTempFile::new("sprint_counter_config.yaml").unwrap();
    config_file.write_str(&config_yaml).unwrap();
    config_file
}

pub struct RunOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the binary off the async runtime so the mock server keeps serving.
pub async fn run_cli(args: Vec<String>) -> RunOutput {
    tokio::task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("sprint-counter");
        cmd.args(&args)
            .env("JIRA_USERNAME", "mockuser")
            .env("JIRA_API_TOKEN", "mocktoken")
            .env_remove("RUST_LOG");
        let output = cmd.output().unwrap();
        RunOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    })
    .await
    .unwrap()
}
