//! factfeed CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use factfeed::app::App;
use factfeed::cache::paths;
use factfeed::cli::{self, Cli, Command};
use factfeed::config::Config;
use factfeed::context::SiteContext;
use factfeed::error::Result;
use factfeed::logging;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let level = logging::level_for(cli.verbose);
    let config_path = cli.config.clone();
    let command = cli.into_command();

    // The TUI owns the terminal, so it logs to a file
    match (&command, paths::log_path()) {
        (Command::Browse(_), Some(path)) => logging::init_file(level, &path)?,
        (Command::Browse(_), None) => {}
        _ => logging::init_stderr(level),
    }

    let config = Config::load(config_path.as_deref())?;

    match command {
        Command::Browse(args) => {
            let context = SiteContext::from_config(config, args.source.as_deref())?;
            browse(context)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Print {
            source,
            tag,
            search,
            batches,
        } => {
            let context = SiteContext::from_config(config, source.source.as_deref())?;
            cli::run_print(&context, cli::print_filter(tag, search), batches).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { file } => {
            if cli::run_check(&file).await? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn browse(context: SiteContext) -> Result<()> {
    let mut app = App::new(context);

    let mut terminal = ratatui::init();
    let result = tokio::task::block_in_place(|| app.run(&mut terminal));
    ratatui::restore();

    result?;
    Ok(())
}
