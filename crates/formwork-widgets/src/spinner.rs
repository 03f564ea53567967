//! Animated progress indicator
//!
//! Each spinner owns a [`NodeId`] and a tag. A tick is only accepted when it
//! carries both, and accepting it bumps the tag, so at most one tick chain
//! drives a spinner no matter how often [`Spinner::tick`] is called.

use std::time::Duration;

use formwork_core::{Command, Component, Message, NodeId, SpinnerTick};
use tracing::trace;

use crate::palette;
use crate::style::Style;

pub const DEFAULT_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq)]
pub struct SpinnerStyle {
    pub frames: Vec<String>,
    pub interval: Duration,
    pub base: Style,
}

impl Default for SpinnerStyle {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAMES.iter().map(|f| f.to_string()).collect(),
            interval: DEFAULT_INTERVAL,
            base: Style::new().fg(palette::ACCENT),
        }
    }
}

impl SpinnerStyle {
    pub fn plain() -> Self {
        Self {
            base: Style::plain(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spinner {
    id: NodeId,
    tag: u64,
    frame: usize,
    style: SpinnerStyle,
}

impl Spinner {
    pub fn new(style: SpinnerStyle) -> Self {
        Self {
            id: NodeId::next(),
            tag: 0,
            frame: 0,
            style,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Schedule the next frame for the current tick chain
    pub fn tick(&self) -> Command {
        Command::after(
            self.style.interval,
            Message::SpinnerTick(SpinnerTick {
                id: self.id,
                tag: self.tag,
            }),
        )
    }
}

impl Component for Spinner {
    fn init(&mut self) -> Command {
        self.tick()
    }

    fn update(&mut self, msg: Message) -> Command {
        match msg {
            Message::SpinnerTick(tick) if tick.id == self.id && tick.tag == self.tag => {
                self.tag = self.tag.wrapping_add(1);
                if !self.style.frames.is_empty() {
                    self.frame = (self.frame + 1) % self.style.frames.len();
                }
                self.tick()
            }
            Message::SpinnerTick(tick) if tick.id == self.id => {
                trace!(spinner = %self.id, tag = tick.tag, "ignoring stale spinner tick");
                Command::none()
            }
            _ => Command::none(),
        }
    }

    fn view(&self) -> String {
        self.style
            .frames
            .get(self.frame)
            .map(|frame| self.style.base.render(frame))
            .unwrap_or_default()
    }

    fn contains_node(&self, id: NodeId) -> bool {
        id == self.id
    }
}
