use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sprout", version)]
#[command(about = "A terminal file explorer that scaffolds directories, Python packages and files")]
#[command(subcommand_precedence_over_arg = true)]
pub struct Args {
    /// Directory to explore
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Show hidden files
    #[arg(short, long)]
    pub all: bool,

    /// Resolve the selection through the system clipboard
    #[arg(long)]
    pub clipboard_selection: bool,

    /// Config file to use instead of the user config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Action>,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Run a scaffolding command without the explorer
    Run {
        /// Command id, e.g. create-python-package.createFile
        id: String,

        /// Selected file or directory
        #[arg(long)]
        path: Option<PathBuf>,

        /// Answer for the picker, e.g. "Python Package"
        #[arg(long)]
        choice: Option<String>,

        /// Answer for the name prompt
        #[arg(long)]
        name: Option<String>,
    },

    /// List the available commands
    Commands,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_defaults_to_cwd() {
        let args = Args::try_parse_from(["sprout"]).unwrap();
        assert_eq!(args.directory, PathBuf::from("."));
        assert!(args.command.is_none());
    }

    #[test]
    fn parses_run_subcommand() {
        let args = Args::try_parse_from([
            "sprout",
            "-vv",
            "run",
            "create-python-package.createFile",
            "--path",
            "src",
            "--choice",
            "Python File",
            "--name",
            "main",
        ])
        .unwrap();

        assert_eq!(args.verbose, 2);
        match args.command {
            Some(Action::Run { id, path, choice, name }) => {
                assert_eq!(id, "create-python-package.createFile");
                assert_eq!(path, Some(PathBuf::from("src")));
                assert_eq!(choice.as_deref(), Some("Python File"));
                assert_eq!(name.as_deref(), Some("main"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn explorer_flags_parse() {
        let args = Args::try_parse_from(["sprout", "-a", "--clipboard-selection", "proj"]).unwrap();
        assert!(args.all);
        assert!(args.clipboard_selection);
        assert_eq!(args.directory, PathBuf::from("proj"));
    }
}
