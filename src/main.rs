use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use sprout_cli::cli::args::{Action, Args};
use sprout_cli::cli::host::ArgsHost;
use sprout_cli::infra::clipboard::SystemClipboard;
use sprout_cli::infra::logging;
use sprout_cli::tui::App;
use sprout_cli::{Command, Config, Explorer, Scaffolder};
use tracing::info;

// 1. parse args, install logging, load config
// 2. no subcommand: run the explorer rooted at the given directory
// 3. `run`: execute one command non-interactively from the answers on the command line
fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logging::init(args.verbose, args.log_file.as_deref())?;
    let config = Config::load(args.config.as_deref())?;

    match &args.command {
        None => explore(&args, config),
        Some(Action::Commands) => {
            for command in Command::ALL {
                println!("{}\t{}", command.id(), command.title());
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Action::Run {
            id,
            path,
            choice,
            name,
        }) => {
            let command: Command = id.parse().map_err(|err: String| anyhow!(err))?;
            let mut host = ArgsHost::new(path.clone(), choice.clone(), name.clone());
            let scaffolder = Scaffolder::new(config.language);

            // failures were already reported through the host
            let _ = command.execute(&mut host, &scaffolder);
            Ok(if host.errors() > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

fn explore(args: &Args, mut config: Config) -> Result<ExitCode> {
    config.explorer.show_hidden |= args.all;
    config.explorer.clipboard_selection |= args.clipboard_selection;

    let explorer = Explorer::new(args.directory.clone(), config.explorer.show_hidden)
        .with_context(|| format!("cannot explore {}", args.directory.display()))?;
    info!(root = %explorer.current_dir().display(), "starting explorer");

    let mut terminal = ratatui::init();
    let mut app = App::new(explorer, &config, Box::new(SystemClipboard::new()));
    let result = app.run(&mut terminal);
    ratatui::restore();
    result?;
    Ok(ExitCode::SUCCESS)
}
