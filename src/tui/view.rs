use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::core::explorer::Explorer;
use crate::core::host::Level;

/// Last message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// The explorer listing with a status line underneath.
pub struct ExplorerView<'a> {
    pub explorer: &'a Explorer,
    pub notice: Option<&'a Notice>,
}

impl Widget for &ExplorerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = Line::from(format!(" {} ", self.explorer.current_dir().display()).bold());
        let instructions = Line::from(vec![
            " New dir ".into(),
            "<d>".blue().bold(),
            " New file ".into(),
            "<f>".blue().bold(),
            " Copy path ".into(),
            "<y>".blue().bold(),
            " Palette ".into(),
            "<:>".blue().bold(),
            " Quit ".into(),
            "<q> ".blue().bold(),
        ]);
        let block = Block::bordered()
            .title(title.centered())
            .title_bottom(instructions.centered())
            .border_set(border::THICK);

        let inner = block.inner(area);
        block.render(area, buf);

        let [list_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        Paragraph::new(self.lines(list_area.height as usize)).render(list_area, buf);

        if let Some(notice) = self.notice {
            let style = match notice.level {
                Level::Info => Style::new().green(),
                Level::Error => Style::new().red().bold(),
            };
            Paragraph::new(Line::styled(notice.message.as_str(), style)).render(status_area, buf);
        }
    }
}

impl ExplorerView<'_> {
    fn lines(&self, height: usize) -> Vec<Line<'_>> {
        let entries = self.explorer.entries();
        if entries.is_empty() {
            return vec![Line::from("(empty)".dim())];
        }

        // keep the highlighted row on screen
        let offset = (self.explorer.selected_index() + 1).saturating_sub(height);
        entries
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(index, entry)| {
                let span = if entry.is_dir {
                    Span::from(format!("{}/", entry.name)).blue().bold()
                } else {
                    Span::from(entry.name.as_str())
                };
                if index == self.explorer.selected_index() {
                    Line::from(span.reversed())
                } else {
                    Line::from(span)
                }
            })
            .collect()
    }
}
