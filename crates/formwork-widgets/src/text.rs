//! Static text leaf

use formwork_core::{Command, Component, Message};

use crate::palette;
use crate::style::Style;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub base: Style,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            base: Style::new().fg(palette::TEXT),
        }
    }
}

impl TextStyle {
    pub fn plain() -> Self {
        Self {
            base: Style::plain(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Text {
    content: String,
    style: TextStyle,
}

impl Text {
    pub fn new(content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

impl Component for Text {
    fn update(&mut self, _msg: Message) -> Command {
        Command::none()
    }

    fn view(&self) -> String {
        self.style.base.render(&self.content)
    }
}
