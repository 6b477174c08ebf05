use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count per-person sprint results and print them
    Report {
        /// Path to the report config YAML
        #[arg(short, long)]
        config: String,
        /// Optional YAML file to write the report to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List the sprints the configured period selects
    ListSprints {
        /// Path to the report config YAML
        #[arg(short, long)]
        config: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
