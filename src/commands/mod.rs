pub mod base_commands;
pub mod list_sprints_cmd;
pub mod report_cmd;
pub mod report_format;
