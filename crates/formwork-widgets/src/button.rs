//! Button leaf: a label that reflects focus and active state

use formwork_core::{Command, Component, Message};

use crate::palette;
use crate::style::Style;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    pub base: Style,
    pub focus: Style,
    pub active: Style,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            base: Style::new().fg(palette::TEXT).padding_x(1),
            focus: Style::new()
                .fg(palette::TEXT)
                .bold()
                .bg(palette::ACCENT)
                .padding_x(1),
            active: Style::new().bold().fg(palette::ACCENT).padding_x(1),
        }
    }
}

impl ButtonStyle {
    pub fn plain() -> Self {
        Self {
            base: Style::plain(),
            focus: Style::plain(),
            active: Style::plain(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Button {
    label: String,
    style: ButtonStyle,
    focus: bool,
    active: bool,
}

impl Button {
    pub fn new(label: impl Into<String>, style: ButtonStyle) -> Self {
        Self {
            label: label.into(),
            style,
            focus: false,
            active: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn is_focused(&self) -> bool {
        self.focus
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Component for Button {
    fn update(&mut self, msg: Message) -> Command {
        match msg {
            Message::Focus(focus) => self.focus = focus,
            Message::Active(active) => self.active = active,
            _ => {}
        }
        Command::none()
    }

    fn view(&self) -> String {
        // Focus wins over active
        if self.focus {
            self.style.focus.render(&self.label)
        } else if self.active {
            self.style.active.render(&self.label)
        } else {
            self.style.base.render(&self.label)
        }
    }
}
