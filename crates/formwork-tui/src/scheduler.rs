//! Executing effects off the dispatch loop
//!
//! A [`Scheduler`] takes deferred work and timers and promises to deliver
//! exactly one message for each back to the dispatch loop. Nothing it runs
//! touches component state.

use std::time::Duration;

use formwork_core::{Command, Effect, Message, Task};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{trace, warn};

pub trait Scheduler {
    /// Run `task` and deliver its message
    fn perform(&self, task: Task);

    /// Deliver `message` after `delay`
    fn after(&self, delay: Duration, message: Message);
}

/// Hand every effect of `command` to `scheduler`. Returns whether the
/// command asked the program to quit.
pub fn dispatch(command: Command, scheduler: &dyn Scheduler) -> bool {
    let mut quit = false;
    for effect in command.into_effects() {
        match effect {
            Effect::Perform(task) => scheduler.perform(task),
            Effect::After { delay, message } => scheduler.after(delay, message),
            Effect::Quit => quit = true,
        }
    }
    quit
}

/// Runs tasks on tokio's blocking pool and timers on the runtime, sending
/// results into an unbounded channel read by the dispatch loop
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<Message>,
    runtime: Handle,
}

impl TokioScheduler {
    /// Must be called from within a tokio runtime
    pub fn new(tx: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            tx,
            runtime: Handle::current(),
        }
    }

    pub fn with_handle(tx: mpsc::UnboundedSender<Message>, runtime: Handle) -> Self {
        Self { tx, runtime }
    }
}

impl Scheduler for TokioScheduler {
    fn perform(&self, task: Task) {
        let tx = self.tx.clone();
        self.runtime.spawn_blocking(move || {
            let message = task();
            trace!(?message, "task finished");
            if tx.send(message).is_err() {
                warn!("dispatch loop gone, dropping task result");
            }
        });
    }

    fn after(&self, delay: Duration, message: Message) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // The loop may have exited while we slept
            let _ = tx.send(message);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::InputKey;
    use std::sync::Mutex;

    /// Records what would have been scheduled
    #[derive(Default)]
    struct Recording {
        performed: Mutex<Vec<Message>>,
        timers: Mutex<Vec<(Duration, Message)>>,
    }

    impl Scheduler for Recording {
        fn perform(&self, task: Task) {
            self.performed.lock().unwrap().push(task());
        }

        fn after(&self, delay: Duration, message: Message) {
            self.timers.lock().unwrap().push((delay, message));
        }
    }

    #[test]
    fn test_dispatch_routes_each_effect() {
        let scheduler = Recording::default();
        let command = Command::batch([
            Command::perform(|| Message::Key(InputKey::Enter)),
            Command::after(Duration::from_millis(100), Message::Tick),
        ]);

        assert!(!dispatch(command, &scheduler));
        assert_eq!(scheduler.performed.lock().unwrap().len(), 1);
        let timers = scheduler.timers.lock().unwrap();
        assert_eq!(timers.len(), 1);
        assert_eq!(timers[0].0, Duration::from_millis(100));
    }

    #[test]
    fn test_dispatch_reports_quit() {
        let scheduler = Recording::default();
        assert!(dispatch(Command::quit(), &scheduler));
        assert!(!dispatch(Command::none(), &scheduler));
    }

    #[tokio::test]
    async fn test_tokio_scheduler_delivers_task_result() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduler = TokioScheduler::new(tx);
        scheduler.perform(Box::new(|| Message::Key(InputKey::Char('x'))));

        let message = rx.recv().await.expect("task result");
        assert!(matches!(message, Message::Key(InputKey::Char('x'))));
    }

    #[tokio::test]
    async fn test_tokio_scheduler_delivers_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduler = TokioScheduler::new(tx);
        let started = tokio::time::Instant::now();
        scheduler.after(Duration::from_millis(20), Message::Tick);

        assert!(rx.try_recv().is_err());
        let message = rx.recv().await.expect("timer message");
        assert!(matches!(message, Message::Tick));
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
