pub mod attribution;
pub mod category_summary;
pub mod data_source;
pub mod jira_api;
pub mod jira_mapping;
pub mod report;
pub mod report_config;
pub mod report_yaml;
pub mod sprint_selector;
