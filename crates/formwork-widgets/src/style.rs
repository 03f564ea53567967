//! Terminal styling primitive
//!
//! A [`Style`] is a crossterm [`ContentStyle`] plus horizontal spacing.
//! Rendering produces a plain `String` with ANSI sequences embedded, which is
//! all the component contract needs.

use crossterm::style::{Attribute, Color, ContentStyle};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Style {
    content: ContentStyle,
    padding_left: u16,
    padding_right: u16,
    margin_right: u16,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// No colors, attributes or spacing: renders text unchanged
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.content.foreground_color = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.content.background_color = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.content.attributes.set(Attribute::Bold);
        self
    }

    /// Swap foreground and background
    pub fn reverse(mut self) -> Self {
        self.content.attributes.set(Attribute::Reverse);
        self
    }

    /// Spaces on both sides, inside the colored area
    pub fn padding_x(mut self, width: u16) -> Self {
        self.padding_left = width;
        self.padding_right = width;
        self
    }

    pub fn padding_right(mut self, width: u16) -> Self {
        self.padding_right = width;
        self
    }

    /// Spaces after the colored area
    pub fn margin_right(mut self, width: u16) -> Self {
        self.margin_right = width;
        self
    }

    /// Apply the style to every line of `text`
    pub fn render(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| self.render_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_line(&self, line: &str) -> String {
        let padded = format!(
            "{}{}{}",
            " ".repeat(self.padding_left as usize),
            line,
            " ".repeat(self.padding_right as usize)
        );
        format!(
            "{}{}",
            self.content.apply(padded),
            " ".repeat(self.margin_right as usize)
        )
    }
}
