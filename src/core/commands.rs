//! The two user-facing commands and their shared workflow:
//! resolve base directory, pick what to create, prompt for a name, create.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::core::host::{Host, InputOptions, Level};
use crate::core::scaffold::Scaffolder;
use crate::core::selection::resolve_base_directory;
use crate::error::ScaffoldError;

const PICK_PLACEHOLDER: &str = "Select what to create";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CreateDirectory,
    CreateFile,
}

/// What the picker resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Directory,
    Package,
    File,
    TypedFile,
}

impl Command {
    pub const ALL: [Command; 2] = [Command::CreateDirectory, Command::CreateFile];

    pub fn id(self) -> &'static str {
        match self {
            Command::CreateDirectory => "create-python-package.createDirectory",
            Command::CreateFile => "create-python-package.createFile",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Command::CreateDirectory => "New Directory or Package",
            Command::CreateFile => "New File or Typed File",
        }
    }

    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.title() == title)
    }

    /// Picker labels, in display order.
    pub fn choices(self, scaffolder: &Scaffolder) -> Vec<String> {
        self.targets()
            .iter()
            .map(|target| target.label(scaffolder))
            .collect()
    }

    fn targets(self) -> [Target; 2] {
        match self {
            Command::CreateDirectory => [Target::Directory, Target::Package],
            Command::CreateFile => [Target::File, Target::TypedFile],
        }
    }

    /// Runs the workflow. Failures are shown to the user as a single error
    /// notice before being returned; cancellation is `Ok`.
    pub fn execute<H: Host + ?Sized>(
        self,
        host: &mut H,
        scaffolder: &Scaffolder,
    ) -> Result<(), ScaffoldError> {
        self.run(host, scaffolder).inspect_err(|err| {
            debug!(command = self.id(), error = %err, "command failed");
            host.notify(Level::Error, &err.to_string());
        })
    }

    fn run<H: Host + ?Sized>(
        self,
        host: &mut H,
        scaffolder: &Scaffolder,
    ) -> Result<(), ScaffoldError> {
        let base_dir = resolve_base_directory(host)?;

        let choices = self.choices(scaffolder);
        let Some(choice) = host.pick(&choices, PICK_PLACEHOLDER) else {
            debug!(command = self.id(), "picker dismissed");
            return Ok(());
        };
        let Some(target) = self
            .targets()
            .into_iter()
            .find(|target| target.label(scaffolder) == choice)
        else {
            debug!(command = self.id(), choice = %choice, "unrecognised choice");
            return Ok(());
        };

        let name = match host.prompt(&target.input_options(scaffolder)) {
            Some(name) if !name.is_empty() => name,
            _ => {
                debug!(command = self.id(), "name prompt dismissed");
                return Ok(());
            }
        };

        match target {
            Target::Directory => scaffolder.create_plain_directory(host, &base_dir, &name),
            Target::Package => scaffolder.create_typed_package(host, &base_dir, &name),
            Target::File => scaffolder.create_plain_file(host, &base_dir, &name),
            Target::TypedFile => scaffolder.create_typed_file(host, &base_dir, &name),
        }
    }
}

impl Target {
    fn label(self, scaffolder: &Scaffolder) -> String {
        let language = &scaffolder.language().name;
        match self {
            Target::Directory => "Directory".to_owned(),
            Target::Package => format!("{language} Package"),
            Target::File => "File".to_owned(),
            Target::TypedFile => format!("{language} File"),
        }
    }

    fn input_options(self, scaffolder: &Scaffolder) -> InputOptions {
        let language = scaffolder.language();
        match self {
            Target::Directory => InputOptions::new("Enter the name of the directory"),
            Target::Package => {
                InputOptions::new(format!("Enter the name of the {} package", language.name))
            }
            Target::File => InputOptions::new("Enter the name of the file").placeholder("example"),
            Target::TypedFile => InputOptions::new(format!(
                "Enter the name of the {} file (without {} extension)",
                language.name, language.extension
            ))
            .placeholder("example"),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.id() == s)
            .ok_or_else(|| format!("unknown command: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::mock::{CountingClipboard, MockHost};
    use std::fs;
    use tempfile::TempDir;

    fn run(command: Command, host: &mut MockHost) -> Result<(), ScaffoldError> {
        command.execute(host, &Scaffolder::default())
    }

    #[test]
    fn ids_round_trip_through_from_str() {
        for command in Command::ALL {
            assert_eq!(command.id().parse::<Command>().unwrap(), command);
        }
        assert!("copyFilePath".parse::<Command>().is_err());
    }

    #[test]
    fn choices_follow_language_name() {
        let scaffolder = Scaffolder::default();
        assert_eq!(
            Command::CreateDirectory.choices(&scaffolder),
            vec!["Directory", "Python Package"]
        );
        assert_eq!(
            Command::CreateFile.choices(&scaffolder),
            vec!["File", "Python File"]
        );
    }

    #[test]
    fn no_selection_shows_one_error_and_prompts_nothing() {
        let mut host = MockHost {
            clipboard: CountingClipboard::with_text("clip"),
            ..MockHost::default()
        };

        let result = run(Command::CreateDirectory, &mut host);

        assert!(matches!(result, Err(ScaffoldError::NoSelection)));
        assert_eq!(
            host.notices,
            vec![(Level::Error, "No file selected in the explorer view.".to_owned())]
        );
        assert!(host.offered.is_empty());
        assert_eq!(host.clipboard.text(), "clip");
    }

    #[test]
    fn dismissed_picker_is_silent() {
        let temp_dir = TempDir::new().unwrap();
        let mut host = MockHost::selecting(temp_dir.path()).answering(None, Some("pkg"));

        run(Command::CreateDirectory, &mut host).unwrap();

        assert!(host.notices.is_empty());
        assert!(host.prompts.is_empty());
        assert!(!temp_dir.path().join("pkg").exists());
    }

    #[test]
    fn empty_or_dismissed_name_is_silent() {
        let temp_dir = TempDir::new().unwrap();
        let mut host = MockHost::selecting(temp_dir.path())
            .answering(Some("File"), Some(""))
            .answering(Some("File"), None);

        run(Command::CreateFile, &mut host).unwrap();
        run(Command::CreateFile, &mut host).unwrap();

        assert!(host.notices.is_empty());
        assert!(host.opened.is_empty());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn package_created_next_to_selected_file() {
        let temp_dir = TempDir::new().unwrap();
        let selected = temp_dir.path().join("setup.py");
        fs::write(&selected, "").unwrap();
        let mut host =
            MockHost::selecting(&selected).answering(Some("Python Package"), Some("core"));

        run(Command::CreateDirectory, &mut host).unwrap();

        assert!(temp_dir.path().join("core/__init__.py").is_file());
        assert_eq!(
            host.offered,
            vec![vec!["Directory".to_owned(), "Python Package".to_owned()]]
        );
        assert_eq!(host.prompts[0].prompt, "Enter the name of the Python package");
    }

    #[test]
    fn typed_file_prompt_and_creation() {
        let temp_dir = TempDir::new().unwrap();
        let mut host =
            MockHost::selecting(temp_dir.path()).answering(Some("Python File"), Some("main"));

        run(Command::CreateFile, &mut host).unwrap();

        let created = temp_dir.path().join("main.py");
        assert!(created.is_file());
        assert_eq!(host.opened, vec![created]);
        assert_eq!(
            host.prompts[0],
            InputOptions::new("Enter the name of the Python file (without .py extension)")
                .placeholder("example")
        );
    }

    #[test]
    fn filesystem_failure_becomes_one_error_notice() {
        let temp_dir = TempDir::new().unwrap();
        let mut host =
            MockHost::selecting(temp_dir.path()).answering(Some("Directory"), Some("x/y"));

        let result = run(Command::CreateDirectory, &mut host);

        assert!(matches!(result, Err(ScaffoldError::Create { .. })));
        assert_eq!(host.count(Level::Error), 1);
    }

    #[test]
    fn existing_file_is_not_a_workflow_failure() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("README"), "hi").unwrap();
        let mut host =
            MockHost::selecting(temp_dir.path()).answering(Some("File"), Some("README"));

        run(Command::CreateFile, &mut host).unwrap();

        assert_eq!(host.count(Level::Error), 1);
        assert!(host.opened.is_empty());
    }
}
