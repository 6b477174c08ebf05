use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use sprint_counter::commands::base_commands::{CliArgs, Commands};
use sprint_counter::commands::list_sprints_cmd::list_sprints_command;
use sprint_counter::commands::report_cmd::report_command;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let outcome = match args.command {
        Commands::Report { config, output } => report_command(&config, output.as_deref()).await,
        Commands::ListSprints { config } => list_sprints_command(&config).await,
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut io::stdout());
            Ok(())
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "sprint_counter=debug,info" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
