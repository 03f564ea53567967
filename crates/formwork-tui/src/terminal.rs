//! Terminal setup and restoration

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use formwork_core::prelude::*;

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}

/// Leave raw mode and the alternate screen
pub fn restore() -> Result<()> {
    disable_raw_mode().map_err(|e| Error::TerminalRestore(e.to_string()))?;
    execute!(io::stdout(), Show, LeaveAlternateScreen)
        .map_err(|e| Error::TerminalRestore(e.to_string()))
}

/// Owns the terminal while the program runs; restores it on drop
pub struct Terminal {
    out: Stdout,
    last_frame: Option<String>,
}

impl Terminal {
    pub fn init() -> Result<Self> {
        enable_raw_mode().map_err(|e| Error::TerminalInit(e.to_string()))?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide).map_err(|e| Error::TerminalInit(e.to_string()))?;
        Ok(Self {
            out,
            last_frame: None,
        })
    }

    /// Replace the screen contents with `frame`. Unchanged frames are not
    /// redrawn.
    pub fn draw(&mut self, frame: &str) -> Result<()> {
        if self.last_frame.as_deref() == Some(frame) {
            return Ok(());
        }
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        // Raw mode: a bare newline does not return the carriage
        self.out.write_all(to_raw_lines(frame).as_bytes())?;
        self.out.flush()?;
        self.last_frame = Some(frame.to_string());
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            error!("{e}");
        }
    }
}

fn to_raw_lines(frame: &str) -> String {
    frame.replace('\n', "\r\n")
}
