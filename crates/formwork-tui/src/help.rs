//! Help surface: short (one line) and full (columns) views over key bindings

use formwork_core::KeyBinding;
use formwork_widgets::{palette, Style};

const SHORT_SEPARATOR: &str = " • ";
const COLUMN_GAP: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelpStyle {
    pub key: Style,
    pub description: Style,
    pub separator: Style,
}

impl Default for HelpStyle {
    fn default() -> Self {
        Self {
            key: Style::new().fg(palette::TEXT).bold(),
            description: Style::new().fg(palette::MUTED),
            separator: Style::new().fg(palette::MUTED),
        }
    }
}

impl HelpStyle {
    pub fn plain() -> Self {
        Self {
            key: Style::plain(),
            description: Style::plain(),
            separator: Style::plain(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Help {
    show_all: bool,
    style: HelpStyle,
}

/// A rendered line plus its printable width
struct Cell {
    width: usize,
    rendered: String,
}

impl Help {
    pub fn new(style: HelpStyle) -> Self {
        Self {
            show_all: false,
            style,
        }
    }

    pub fn toggle(&mut self) {
        self.show_all = !self.show_all;
    }

    pub fn is_showing_all(&self) -> bool {
        self.show_all
    }

    /// Full view when toggled on, short view otherwise
    pub fn view(&self, short: &[KeyBinding], full: &[Vec<KeyBinding>]) -> String {
        if self.show_all {
            self.full_view(full)
        } else {
            self.short_view(short)
        }
    }

    /// `key description` pairs on one line
    pub fn short_view(&self, bindings: &[KeyBinding]) -> String {
        let separator = self.style.separator.render(SHORT_SEPARATOR);
        bindings
            .iter()
            .filter(|b| b.enabled)
            .map(|b| {
                format!(
                    "{} {}",
                    self.style.key.render(&b.help_key()),
                    self.style.description.render(&b.help)
                )
            })
            .collect::<Vec<_>>()
            .join(separator.as_str())
    }

    /// One column per group, keys aligned within each column
    pub fn full_view(&self, groups: &[Vec<KeyBinding>]) -> String {
        let columns: Vec<Vec<Cell>> = groups
            .iter()
            .map(|group| self.column(group))
            .filter(|column| !column.is_empty())
            .collect();
        let widths: Vec<usize> = columns
            .iter()
            .map(|column| column.iter().map(|cell| cell.width).max().unwrap_or(0))
            .collect();
        let rows = columns.iter().map(Vec::len).max().unwrap_or(0);

        let mut lines = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut line = String::new();
            for (c, column) in columns.iter().enumerate() {
                let last = c + 1 == columns.len();
                if c > 0 {
                    line.push_str(COLUMN_GAP);
                }
                let used = match column.get(row) {
                    Some(cell) => {
                        line.push_str(&cell.rendered);
                        cell.width
                    }
                    None => 0,
                };
                if !last {
                    line.push_str(&" ".repeat(widths[c] - used));
                }
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    fn column(&self, group: &[KeyBinding]) -> Vec<Cell> {
        let bindings: Vec<(String, &str)> = group
            .iter()
            .filter(|b| b.enabled)
            .map(|b| (b.help_key(), b.help.as_str()))
            .collect();
        let key_width = bindings
            .iter()
            .map(|(key, _)| key.chars().count())
            .max()
            .unwrap_or(0);

        bindings
            .into_iter()
            .map(|(key, help)| {
                let key = format!("{key:<key_width$}");
                Cell {
                    width: key_width + 1 + help.chars().count(),
                    rendered: format!(
                        "{} {}",
                        self.style.key.render(&key),
                        self.style.description.render(help)
                    ),
                }
            })
            .collect()
    }
}
