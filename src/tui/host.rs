//! Host backed by the terminal explorer. Prompts are modal loops drawn on
//! top of the explorer view.

use std::path::{Path, PathBuf};
use std::process::Command;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{DefaultTerminal, widgets::Clear, widgets::Widget};
use tracing::{debug, warn};

use crate::core::explorer::Explorer;
use crate::core::host::{Clipboard, Host, InputOptions, Level};
use crate::error::ScaffoldError;
use crate::tui::prompt::{Modal, Picker, PromptEvent, TextInput, popup_area};
use crate::tui::view::{ExplorerView, Notice};

pub struct TerminalHost<'a> {
    terminal: &'a mut DefaultTerminal,
    explorer: &'a Explorer,
    clipboard: &'a mut dyn Clipboard,
    direct_selection: bool,
    editor: Option<String>,
    notice: Option<Notice>,
}

impl<'a> TerminalHost<'a> {
    pub fn new(
        terminal: &'a mut DefaultTerminal,
        explorer: &'a Explorer,
        clipboard: &'a mut dyn Clipboard,
        notice: Option<Notice>,
    ) -> Self {
        Self {
            terminal,
            explorer,
            clipboard,
            direct_selection: true,
            editor: None,
            notice,
        }
    }

    /// When disabled the selection is recovered through the clipboard.
    pub fn direct_selection(mut self, enabled: bool) -> Self {
        self.direct_selection = enabled;
        self
    }

    pub fn editor(mut self, editor: Option<String>) -> Self {
        self.editor = editor;
        self
    }

    pub fn into_notice(self) -> Option<Notice> {
        self.notice
    }

    fn run_modal<M>(&mut self, modal: &mut M) -> Option<String>
    where
        M: Modal,
        for<'m> &'m M: Widget,
    {
        let view = ExplorerView {
            explorer: self.explorer,
            notice: self.notice.as_ref(),
        };

        loop {
            let drawn = self.terminal.draw(|frame| {
                frame.render_widget(&view, frame.area());
                let area = popup_area(frame.area(), modal.height());
                frame.render_widget(Clear, area);
                frame.render_widget(&*modal, area);
            });
            if let Err(err) = drawn {
                warn!(error = %err, "failed to draw prompt");
                return None;
            }

            match event::read() {
                Ok(Event::Key(key_event)) if key_event.kind == KeyEventKind::Press => {
                    match modal.handle_key(key_event) {
                        PromptEvent::Submit(value) => return Some(value),
                        PromptEvent::Cancel => return None,
                        PromptEvent::Continue => {}
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, "failed to read terminal event");
                    return None;
                }
            }
        }
    }

    fn run_editor(&mut self, editor: &str, path: &Path) -> Result<(), ScaffoldError> {
        let mut parts = editor.split_whitespace();
        let Some(program) = parts.next() else {
            return Ok(());
        };

        ratatui::restore();
        let status = Command::new(program).args(parts).arg(path).status();
        *self.terminal = ratatui::try_init()?;

        let failure = match status {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => format!("{program} exited with status {status}"),
            Err(err) => format!("could not run {program}: {err}"),
        };
        Err(ScaffoldError::Editor {
            path: path.to_path_buf(),
            reason: failure,
        })
    }
}

impl Host for TerminalHost<'_> {
    fn clipboard(&mut self) -> &mut dyn Clipboard {
        &mut *self.clipboard
    }

    fn selected_resource(&self) -> Option<PathBuf> {
        self.direct_selection.then(|| self.explorer.selected_path())
    }

    fn copy_selected_path(&mut self) -> Result<(), ScaffoldError> {
        let path = self.explorer.selected_path();
        self.clipboard.write_text(&path.to_string_lossy())
    }

    fn pick(&mut self, items: &[String], placeholder: &str) -> Option<String> {
        let mut picker = Picker::new(items.to_vec(), placeholder);
        self.run_modal(&mut picker)
    }

    fn prompt(&mut self, options: &InputOptions) -> Option<String> {
        let mut input = TextInput::new(options.clone());
        self.run_modal(&mut input)
    }

    fn notify(&mut self, level: Level, message: &str) {
        debug!(?level, message, "notice");
        self.notice = Some(Notice {
            level,
            message: message.to_owned(),
        });
    }

    fn open_document(&mut self, path: &Path) -> Result<(), ScaffoldError> {
        match self.editor.clone() {
            Some(editor) => self.run_editor(&editor, path),
            None => {
                self.notify(Level::Info, &format!("Created {}", path.display()));
                Ok(())
            }
        }
    }
}
