use crate::commands::report_cmd::{CommandError, connect};
use crate::commands::report_format::format_sprint_list;
use crate::services::report::select_board_sprints;

pub async fn list_sprints_command(config_path: &str) -> Result<(), CommandError> {
    let (config, client) = connect(config_path).await?;
    let period = config.reporting_period()?;

    let sprints = select_board_sprints(&client, &config.board_name, &period).await?;
    println!("{}", format_sprint_list(&sprints));
    Ok(())
}
