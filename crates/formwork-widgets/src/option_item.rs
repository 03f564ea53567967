//! Option leaf: a cursor glyph followed by a label, for vertical lists

use formwork_core::{Command, Component, Message};

use crate::palette;
use crate::style::Style;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionItemStyle {
    pub text_base: Style,
    pub text_focus: Style,
    pub text_active: Style,
    pub cursor_base: Style,
    pub cursor_focus: Style,
    pub cursor_active: Style,
}

impl Default for OptionItemStyle {
    fn default() -> Self {
        let focus = Style::new().fg(palette::TEXT).bold().bg(palette::ACCENT);
        let active = Style::new().fg(palette::ACCENT).bold();
        Self {
            text_base: Style::new().fg(palette::TEXT).margin_right(1),
            text_focus: focus.margin_right(1),
            text_active: active.margin_right(1),
            cursor_base: Style::new().fg(palette::TEXT).padding_right(1),
            cursor_focus: focus.padding_right(1),
            cursor_active: active.padding_right(1),
        }
    }
}

impl OptionItemStyle {
    /// Unstyled, with a single space between cursor and label
    pub fn plain() -> Self {
        Self {
            text_base: Style::plain(),
            text_focus: Style::plain(),
            text_active: Style::plain(),
            cursor_base: Style::plain().padding_right(1),
            cursor_focus: Style::plain().padding_right(1),
            cursor_active: Style::plain().padding_right(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptionItem {
    label: String,
    cursor: String,
    style: OptionItemStyle,
    focus: bool,
    active: bool,
}

impl OptionItem {
    pub fn new(label: impl Into<String>, style: OptionItemStyle) -> Self {
        Self {
            label: label.into(),
            cursor: ">".to_string(),
            style,
            focus: false,
            active: false,
        }
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = cursor.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_focused(&self) -> bool {
        self.focus
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Component for OptionItem {
    fn update(&mut self, msg: Message) -> Command {
        match msg {
            Message::Focus(focus) => self.focus = focus,
            Message::Active(active) => self.active = active,
            _ => {}
        }
        Command::none()
    }

    fn view(&self) -> String {
        let (cursor, text) = if self.focus {
            (&self.style.cursor_focus, &self.style.text_focus)
        } else if self.active {
            (&self.style.cursor_active, &self.style.text_active)
        } else {
            (&self.style.cursor_base, &self.style.text_base)
        };
        format!("{}{}", cursor.render(&self.cursor), text.render(&self.label))
    }
}
