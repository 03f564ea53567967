//! Labelled wrapper

use formwork_core::{Command, Component, Message};
use formwork_widgets::{palette, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStyle {
    pub label: Style,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            label: Style::new().fg(palette::TEXT),
        }
    }
}

impl FieldStyle {
    pub fn plain() -> Self {
        Self {
            label: Style::plain(),
        }
    }
}

/// Renders a label on its own line above the child
pub struct Field {
    label: String,
    child: Box<dyn Component>,
    style: FieldStyle,
}

impl Field {
    pub fn new(label: impl Into<String>, child: impl Component + 'static, style: FieldStyle) -> Self {
        Self {
            label: label.into(),
            child: Box::new(child),
            style,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Component for Field {
    fn init(&mut self) -> Command {
        self.child.init()
    }

    fn update(&mut self, msg: Message) -> Command {
        self.child.update(msg)
    }

    fn view(&self) -> String {
        format!("{}\n{}", self.style.label.render(&self.label), self.child.view())
    }

    fn child(&self) -> Option<&dyn Component> {
        Some(self.child.as_ref())
    }

    fn child_mut(&mut self) -> Option<&mut dyn Component> {
        Some(self.child.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::{has_capability, Capability};
    use formwork_widgets::{Text, TextStyle};

    #[test]
    fn test_label_above_child() {
        let field = Field::new(
            "Enter the server host",
            Text::new("> ", TextStyle::plain()),
            FieldStyle::plain(),
        );
        assert_eq!(field.view(), "Enter the server host\n> ");
    }

    #[test]
    fn test_field_adds_no_capability() {
        let field = Field::new("l", Text::new("t", TextStyle::plain()), FieldStyle::plain());
        assert!(has_capability(&field, Capability::HasChild));
        assert!(!has_capability(&field, Capability::Valued));
        assert!(!has_capability(&field, Capability::Hideable));
    }
}
