//! Main runner - terminal lifecycle and the dispatch loop
//!
//! The loop owns the root component and feeds it one message at a time:
//! first everything tasks and timers have sent back, then a frame is drawn,
//! then one terminal event (or a tick when the terminal is quiet).

use formwork_core::prelude::*;
use formwork_core::{Component, Message};
use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::event::{self, POLL_INTERVAL};
use crate::scheduler::{dispatch, Scheduler, TokioScheduler};
use crate::terminal::{self, Terminal};

/// Run `root` until it returns a quit effect. Returns the last view so the
/// caller can print it once the terminal is restored.
///
/// Must be called from within a multi-threaded tokio runtime; the loop
/// blocks its thread while polling the terminal.
pub fn run(root: &mut dyn Component) -> Result<String> {
    terminal::install_panic_hook();
    let mut term = Terminal::init().context("Failed to set up terminal")?;
    info!("formwork runner started");

    let (tx, rx) = mpsc::unbounded_channel();
    let scheduler = TokioScheduler::new(tx);
    let result = run_loop(&mut term, root, rx, &scheduler);

    drop(term);
    info!("formwork runner stopped");
    result.map(|()| root.view())
}

fn run_loop(
    term: &mut Terminal,
    root: &mut dyn Component,
    mut rx: mpsc::UnboundedReceiver<Message>,
    scheduler: &dyn Scheduler,
) -> Result<()> {
    if dispatch(root.init(), scheduler) {
        return Ok(());
    }

    loop {
        if drain(root, &mut rx, scheduler)? {
            return Ok(());
        }

        term.draw(&root.view())?;

        if let Some(message) = event::poll(POLL_INTERVAL)? {
            if step(root, message, scheduler) {
                return Ok(());
            }
        }
    }
}

/// Deliver one message and schedule its effects. Returns whether to quit.
pub fn step(root: &mut dyn Component, message: Message, scheduler: &dyn Scheduler) -> bool {
    trace!(?message, "dispatch");
    dispatch(root.update(message), scheduler)
}

/// Deliver every message already waiting in `rx`. Returns whether to quit.
///
/// Fails with [`Error::ChannelClosed`] once every sender is gone, since no
/// pending task or timer could report back any more.
pub fn drain(
    root: &mut dyn Component,
    rx: &mut mpsc::UnboundedReceiver<Message>,
    scheduler: &dyn Scheduler,
) -> Result<bool> {
    loop {
        match rx.try_recv() {
            Ok(message) => {
                if step(root, message, scheduler) {
                    return Ok(true);
                }
            }
            Err(TryRecvError::Empty) => return Ok(false),
            Err(TryRecvError::Disconnected) => return Err(Error::ChannelClosed),
        }
    }
}
