//! Helpers for driving components in tests without a terminal or runtime
//!
//! Effects are executed inline: `Perform` tasks run on the calling thread,
//! `After` messages are delivered immediately and `Quit` is dropped.

use std::collections::VecDeque;

use crate::command::{Command, Effect};
use crate::component::Component;
use crate::input_key::InputKey;
use crate::message::Message;

/// Upper bound on messages fed back by [`settle`]
pub const MAX_SETTLE_STEPS: usize = 1_000;

/// Execute every effect of `cmd` inline and collect the resulting messages
pub fn run_effects(cmd: Command) -> Vec<Message> {
    cmd.into_effects()
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::Perform(task) => Some(task()),
            Effect::After { message, .. } => Some(message),
            Effect::Quit => None,
        })
        .collect()
}

/// Feed the messages produced by `cmd` back into `component` until no
/// effects remain. Returns the number of messages delivered.
pub fn settle(component: &mut dyn Component, cmd: Command) -> usize {
    let mut queue: VecDeque<Message> = run_effects(cmd).into();
    let mut delivered = 0;
    while let Some(msg) = queue.pop_front() {
        delivered += 1;
        assert!(
            delivered <= MAX_SETTLE_STEPS,
            "component did not settle after {MAX_SETTLE_STEPS} messages"
        );
        queue.extend(run_effects(component.update(msg)));
    }
    delivered
}

/// Send a key to `component` and settle its effects
pub fn press(component: &mut dyn Component, key: InputKey) {
    let cmd = component.update(Message::Key(key));
    settle(component, cmd);
}

/// Send each character of `text` as a key press
pub fn type_text(component: &mut dyn Component, text: &str) {
    for c in text.chars() {
        press(component, InputKey::Char(c));
    }
}
