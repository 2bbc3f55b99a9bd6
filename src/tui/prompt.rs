//! Modal picker and text input drawn over the explorer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Stylize,
    symbols::border,
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

use crate::core::host::InputOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Continue,
    Submit(String),
    Cancel,
}

pub trait Modal {
    fn handle_key(&mut self, key_event: KeyEvent) -> PromptEvent;

    /// Rows needed including the border.
    fn height(&self) -> u16;
}

/// Centers a popup of `height` rows in `area`, at most 60 columns wide.
pub fn popup_area(area: Rect, height: u16) -> Rect {
    let width = area.width.saturating_sub(4).min(60);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Single-choice list narrowed by a fuzzy query.
pub struct Picker {
    items: Vec<String>,
    placeholder: String,
    query: String,
    visible: Vec<String>,
    selected: usize,
    matcher: Matcher,
}

impl Picker {
    pub fn new(items: Vec<String>, placeholder: impl Into<String>) -> Self {
        Self {
            visible: items.clone(),
            items,
            placeholder: placeholder.into(),
            query: String::new(),
            selected: 0,
            matcher: Matcher::new(Config::DEFAULT),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible(&self) -> &[String] {
        &self.visible
    }

    pub fn selected(&self) -> Option<&str> {
        self.visible.get(self.selected).map(String::as_str)
    }

    fn refilter(&mut self) {
        self.visible = if self.query.is_empty() {
            self.items.clone()
        } else {
            let pattern = Pattern::parse(&self.query, CaseMatching::Ignore, Normalization::Smart);
            pattern
                .match_list(self.items.iter(), &mut self.matcher)
                .into_iter()
                .map(|(item, _score)| item.clone())
                .collect()
        };
        self.selected = 0;
    }
}

impl Modal for Picker {
    fn handle_key(&mut self, key_event: KeyEvent) -> PromptEvent {
        match key_event.code {
            KeyCode::Esc => PromptEvent::Cancel,
            KeyCode::Enter => match self.selected() {
                Some(choice) => PromptEvent::Submit(choice.to_owned()),
                None => PromptEvent::Continue,
            },
            KeyCode::Down => {
                if self.selected + 1 < self.visible.len() {
                    self.selected += 1;
                }
                PromptEvent::Continue
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                PromptEvent::Continue
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.refilter();
                PromptEvent::Continue
            }
            KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.push(c);
                self.refilter();
                PromptEvent::Continue
            }
            _ => PromptEvent::Continue,
        }
    }

    fn height(&self) -> u16 {
        // border, query row, one row per item
        u16::try_from(self.items.len())
            .unwrap_or(u16::MAX)
            .saturating_add(3)
    }
}

impl Widget for &Picker {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(Line::from(format!(" {} ", self.placeholder).bold()).centered())
            .border_set(border::ROUNDED);

        let mut lines = vec![Line::from(vec!["> ".yellow(), self.query.as_str().into()])];
        lines.extend(self.visible.iter().enumerate().map(|(index, item)| {
            if index == self.selected {
                Line::from(item.as_str().reversed())
            } else {
                Line::from(item.as_str())
            }
        }));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

/// Single-line text entry.
#[derive(Debug, Clone)]
pub struct TextInput {
    options: InputOptions,
    value: String,
}

impl TextInput {
    pub fn new(options: InputOptions) -> Self {
        Self {
            options,
            value: String::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Modal for TextInput {
    fn handle_key(&mut self, key_event: KeyEvent) -> PromptEvent {
        match key_event.code {
            KeyCode::Esc => PromptEvent::Cancel,
            KeyCode::Enter => PromptEvent::Submit(self.value.clone()),
            KeyCode::Backspace => {
                self.value.pop();
                PromptEvent::Continue
            }
            KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.push(c);
                PromptEvent::Continue
            }
            _ => PromptEvent::Continue,
        }
    }

    fn height(&self) -> u16 {
        3
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(Line::from(format!(" {} ", self.options.prompt).bold()).centered())
            .border_set(border::ROUNDED);

        let line = match (&self.options.placeholder, self.value.is_empty()) {
            (Some(placeholder), true) => Line::from(placeholder.as_str().dim().italic()),
            _ => Line::from(vec![self.value.as_str().into(), "_".yellow()]),
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}
