//! Effects returned from `init`/`update` for the runner to execute
//!
//! Components never perform side effects themselves. They describe work as a
//! [`Command`]; the runner executes each [`Effect`] off the dispatch loop and
//! delivers the resulting [`Message`] back into the same loop.

use std::fmt;
use std::time::Duration;

use crate::message::Message;

/// A deferred unit of work producing exactly one message
pub type Task = Box<dyn FnOnce() -> Message + Send + 'static>;

/// A single side effect
pub enum Effect {
    /// Run `Task` off the dispatch loop and deliver its message
    Perform(Task),

    /// Deliver `message` after `delay`
    After { delay: Duration, message: Message },

    /// Stop the program after the current update
    Quit,
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Perform(_) => write!(f, "Perform(..)"),
            Effect::After { delay, message } => f
                .debug_struct("After")
                .field("delay", delay)
                .field("message", message)
                .finish(),
            Effect::Quit => write!(f, "Quit"),
        }
    }
}

/// An ordered batch of effects. Empty means "nothing to do".
#[derive(Debug, Default)]
pub struct Command {
    effects: Vec<Effect>,
}

impl Command {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn perform<F>(task: F) -> Self
    where
        F: FnOnce() -> Message + Send + 'static,
    {
        Self {
            effects: vec![Effect::Perform(Box::new(task))],
        }
    }

    pub fn after(delay: Duration, message: Message) -> Self {
        Self {
            effects: vec![Effect::After { delay, message }],
        }
    }

    pub fn quit() -> Self {
        Self {
            effects: vec![Effect::Quit],
        }
    }

    /// Combine several commands, preserving order
    pub fn batch(commands: impl IntoIterator<Item = Command>) -> Self {
        commands.into_iter().collect()
    }

    /// Append `other` after this command's effects
    pub fn and(mut self, other: Command) -> Self {
        self.effects.extend(other.effects);
        self
    }

    pub fn is_none(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn into_effects(self) -> Vec<Effect> {
        self.effects
    }

    pub fn has_quit(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, Effect::Quit))
    }
}

impl FromIterator<Command> for Command {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        let mut batched = Command::none();
        batched.extend(iter);
        batched
    }
}

impl Extend<Command> for Command {
    fn extend<I: IntoIterator<Item = Command>>(&mut self, iter: I) {
        for command in iter {
            self.effects.extend(command.effects);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_key::InputKey;

    #[test]
    fn test_none_is_empty() {
        assert!(Command::none().is_none());
        assert_eq!(Command::none().len(), 0);
    }

    #[test]
    fn test_batch_preserves_order() {
        let cmd = Command::batch([
            Command::after(Duration::from_millis(10), Message::Tick),
            Command::none(),
            Command::quit(),
        ]);
        assert_eq!(cmd.len(), 2);
        assert!(matches!(cmd.effects()[0], Effect::After { .. }));
        assert!(matches!(cmd.effects()[1], Effect::Quit));
    }

    #[test]
    fn test_and_appends() {
        let cmd = Command::perform(|| Message::Tick).and(Command::quit());
        assert_eq!(cmd.len(), 2);
        assert!(cmd.has_quit());
    }

    #[test]
    fn test_perform_runs_task() {
        let cmd = Command::perform(|| Message::Key(InputKey::Enter));
        let mut effects = cmd.into_effects();
        match effects.pop() {
            Some(Effect::Perform(task)) => {
                assert!(matches!(task(), Message::Key(InputKey::Enter)));
            }
            other => panic!("expected perform effect, got {other:?}"),
        }
    }
}
