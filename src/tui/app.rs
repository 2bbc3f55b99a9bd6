use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{DefaultTerminal, Frame, buffer::Buffer, layout::Rect, widgets::Widget};
use tracing::debug;

use crate::config::Config;
use crate::core::commands::Command;
use crate::core::explorer::Explorer;
use crate::core::host::{Clipboard, Host};
use crate::core::scaffold::Scaffolder;
use crate::error::ScaffoldError;
use crate::tui::host::TerminalHost;
use crate::tui::view::{ExplorerView, Notice};

const PALETTE_PLACEHOLDER: &str = "Run a command";

/// Something a key press asks for that needs the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Run(Command),
    Palette,
    CopyPath,
}

pub struct App {
    explorer: Explorer,
    scaffolder: Scaffolder,
    clipboard: Box<dyn Clipboard>,
    clipboard_selection: bool,
    editor: Option<String>,
    notice: Option<Notice>,
    exit: bool,
}

// event flow
// 1. draw the explorer
// 2. read a key: navigation is handled in place, commands get a TerminalHost
// 3. after a command, refresh the listing so new entries show up
impl App {
    pub fn new(explorer: Explorer, config: &Config, clipboard: Box<dyn Clipboard>) -> Self {
        App {
            explorer,
            scaffolder: Scaffolder::new(config.language.clone()),
            clipboard,
            clipboard_selection: config.explorer.clipboard_selection,
            editor: config.editor_command(),
            notice: None,
            exit: false,
        }
    }

    /// runs the application's main loop until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<(), ScaffoldError> {
        while !self.exit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Some(action) = self.handle_events()? {
                self.perform(terminal, action)?;
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn handle_events(&mut self) -> Result<Option<Action>, ScaffoldError> {
        match event::read()? {
            // crossterm also emits key release and repeat events on Windows
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                Ok(self.handle_key_event(key_event))
            }
            _ => Ok(None),
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) -> Option<Action> {
        let result = match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.exit();
                Ok(())
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.explorer.select_next();
                Ok(())
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.explorer.select_previous();
                Ok(())
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.explorer.enter_selected(),
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => self.explorer.go_parent(),
            KeyCode::Char('d') => return Some(Action::Run(Command::CreateDirectory)),
            KeyCode::Char('f') => return Some(Action::Run(Command::CreateFile)),
            KeyCode::Char('y') => return Some(Action::CopyPath),
            KeyCode::Char(':') => return Some(Action::Palette),
            _ => Ok(()),
        };

        if let Err(err) = result {
            self.notice = Some(Notice::error(err.to_string()));
        }
        None
    }

    fn perform(
        &mut self,
        terminal: &mut DefaultTerminal,
        action: Action,
    ) -> Result<(), ScaffoldError> {
        let requested = match action {
            Action::CopyPath => {
                self.copy_selected_path();
                return Ok(());
            }
            Action::Run(command) => Some(command),
            Action::Palette => None,
        };

        let mut host = TerminalHost::new(
            terminal,
            &self.explorer,
            &mut *self.clipboard,
            self.notice.take(),
        )
        .direct_selection(!self.clipboard_selection)
        .editor(self.editor.clone());

        if let Some(command) = requested.or_else(|| palette(&mut host)) {
            if let Err(err) = command.execute(&mut host, &self.scaffolder) {
                debug!(command = command.id(), error = %err, "command aborted");
            }
        }

        self.notice = host.into_notice();
        self.explorer.refresh()
    }

    fn copy_selected_path(&mut self) {
        let path = self.explorer.selected_path();
        self.notice = Some(match self.clipboard.write_text(&path.to_string_lossy()) {
            Ok(()) => Notice::info(format!("Copied {}", path.display())),
            Err(err) => Notice::error(err.to_string()),
        });
    }

    fn exit(&mut self) {
        self.exit = true;
    }
}

fn palette(host: &mut TerminalHost<'_>) -> Option<Command> {
    let titles: Vec<String> = Command::ALL
        .iter()
        .map(|command| command.title().to_owned())
        .collect();
    let title = host.pick(&titles, PALETTE_PLACEHOLDER)?;
    Command::from_title(&title)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = ExplorerView {
            explorer: &self.explorer,
            notice: self.notice.as_ref(),
        };
        (&view).render(area, buf);
    }
}
