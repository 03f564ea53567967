//! Select controller: one active item out of a fixed list
//!
//! Lateral keys move the active index with circular wrap and are consumed.
//! Any change of the active index or of the select's own focus is broadcast
//! to every item as `Focus(i == active && focused)` followed by
//! `Active(i == active)`, before anything else is forwarded. Remaining
//! messages go to the active item only.

use formwork_core::{Command, Component, KeyBinding, Keyed, Message, NodeId, Valued};
use tracing::debug;

use crate::keymap::SelectKeyMap;

/// One entry of a [`Select`]: the value it stands for and how it renders
pub struct SelectItem {
    value: String,
    component: Box<dyn Component>,
}

impl SelectItem {
    pub fn new(value: impl Into<String>, component: impl Component + 'static) -> Self {
        Self {
            value: value.into(),
            component: Box::new(component),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectConfig {
    pub keymap: SelectKeyMap,
    /// Lay items out on one line instead of one per line
    pub inline: bool,
}

pub struct Select {
    items: Vec<SelectItem>,
    config: SelectConfig,
    focus: bool,
    selected_index: usize,
}

impl Select {
    pub fn new(items: Vec<SelectItem>, config: SelectConfig) -> Self {
        Self {
            items,
            config,
            focus: false,
            selected_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn is_focused(&self) -> bool {
        self.focus
    }

    /// Move the active index, clamped to the item range
    pub fn set_selected_index(&mut self, index: usize) -> Command {
        let index = index.min(self.items.len().saturating_sub(1));
        if index == self.selected_index {
            return Command::none();
        }
        self.selected_index = index;
        self.broadcast()
    }

    fn select_previous(&mut self) {
        let n = self.items.len();
        if n > 0 {
            self.selected_index = (self.selected_index + n - 1) % n;
        }
    }

    fn select_next(&mut self) {
        let n = self.items.len();
        if n > 0 {
            self.selected_index = (self.selected_index + 1) % n;
        }
    }

    fn broadcast(&mut self) -> Command {
        let selected = self.selected_index;
        let focus = self.focus;
        let mut cmd = Command::none();
        for (i, item) in self.items.iter_mut().enumerate() {
            cmd.extend([
                item.component.update(Message::Focus(i == selected && focus)),
                item.component.update(Message::Active(i == selected)),
            ]);
        }
        cmd
    }

    fn route(&mut self, target: NodeId, msg: Message) -> Command {
        match self
            .items
            .iter_mut()
            .find(|item| item.component.contains_node(target))
        {
            Some(item) => item.component.update(msg),
            None => Command::none(),
        }
    }
}

impl Component for Select {
    fn init(&mut self) -> Command {
        let inits: Command = self.items.iter_mut().map(|i| i.component.init()).collect();
        inits.and(self.broadcast())
    }

    fn update(&mut self, msg: Message) -> Command {
        if let Some(target) = msg.target() {
            return self.route(target, msg);
        }

        let focus = self.focus;
        let selected_index = self.selected_index;

        let forward = match &msg {
            Message::Focus(focus) => {
                self.focus = *focus;
                false
            }
            Message::Key(key) if self.config.keymap.previous.matches(key) => {
                self.select_previous();
                false
            }
            Message::Key(key) if self.config.keymap.next.matches(key) => {
                self.select_next();
                false
            }
            _ => true,
        };

        let mut cmd = Command::none();
        if self.focus != focus || self.selected_index != selected_index {
            debug!(
                from = selected_index,
                to = self.selected_index,
                focus = self.focus,
                "select changed"
            );
            cmd = cmd.and(self.broadcast());
        }

        if forward {
            if let Some(item) = self.items.get_mut(self.selected_index) {
                cmd = cmd.and(item.component.update(msg));
            }
        }
        cmd
    }

    fn view(&self) -> String {
        let separator = if self.config.inline { " " } else { "\n" };
        self.items
            .iter()
            .map(|item| item.component.view())
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn contains_node(&self, id: NodeId) -> bool {
        self.items.iter().any(|item| item.component.contains_node(id))
    }

    fn as_keyed(&self) -> Option<&dyn Keyed> {
        Some(self)
    }

    fn as_valued(&self) -> Option<&dyn Valued> {
        Some(self)
    }
}

impl Keyed for Select {
    fn keys(&self) -> Vec<KeyBinding> {
        vec![
            self.config.keymap.previous.clone(),
            self.config.keymap.next.clone(),
        ]
    }
}

impl Valued for Select {
    /// Value tag of the active item, not the item's own state
    fn value(&self) -> String {
        self.items
            .get(self.selected_index)
            .map(|item| item.value.clone())
            .unwrap_or_default()
    }
}
