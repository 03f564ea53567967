//! Stock color palette (256-color ANSI indices)

use crossterm::style::Color;

pub const TEXT: Color = Color::AnsiValue(15);
pub const ACCENT: Color = Color::AnsiValue(33);
pub const MUTED: Color = Color::AnsiValue(8);
pub const ERROR: Color = Color::AnsiValue(9);
