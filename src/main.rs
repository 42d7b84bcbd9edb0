use anyhow::Result;
use clap::Parser;
use log::info;

use avaliai_cli::cli::{commands, Cli, Commands};
use avaliai_cli::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Logger writes to a file next to config.db so the terminal stays free
    // for command output and logs do not scatter across working directories.
    let log_path = Config::get_log_path()?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    info!("Starting avaliai-cli");

    let config = Config::load().await?;
    avaliai_cli::init_config(config)?;

    match cli.command {
        Commands::Auth(args) => commands::auth_command(args).await?,
        Commands::Profile(args) => commands::profile_command(args).await?,
        Commands::Exam(args) => commands::exam_command(args).await?,
        Commands::Question(args) => commands::question_command(args).await?,
        Commands::Discipline(args) => commands::discipline_command(args).await?,
        Commands::Classroom(args) => commands::classroom_command(args).await?,
        Commands::Tag(args) => commands::tag_command(args).await?,
        Commands::Raw(args) => commands::raw_command(args).await?,
    }

    Ok(())
}
