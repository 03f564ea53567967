//! formwork-tui - Terminal runner for formwork
//!
//! Owns the terminal, converts crossterm events into messages, executes
//! effects on tokio and feeds their results back into a single dispatch
//! loop. Also renders the help surface.

pub mod event;
pub mod help;
pub mod runner;
pub mod scheduler;
pub mod terminal;

pub use help::{Help, HelpStyle};
pub use runner::run;
pub use scheduler::{dispatch, Scheduler, TokioScheduler};
