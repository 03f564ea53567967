//! Form controller: navigation, validation gate and progressive disclosure
//!
//! The whole navigation state is `(selected_index, step, completed)`:
//!
//! - **Retreat** clears `completed` and lands on the nearest navigable item
//!   before the selection. With none, the selection stays put.
//! - **Advance** first validates the selected item (when it can be
//!   validated) and aborts on failure. Otherwise it lands on the nearest
//!   navigable item after the selection, or sets `completed` when there is
//!   none. `step` is then raised to the selection.
//! - Every selection change broadcasts `Focus(i == selected)` to all items in
//!   order, before anything is forwarded.
//!
//! Items past `step` never render, so the form discloses itself one item at
//! a time and never hides an item again once reached.

use std::collections::BTreeMap;

use formwork_core::{
    is_hidden, is_skipped, resolve_keyed, resolve_validatable, resolve_validatable_mut,
    resolve_valued, Command, Component, KeyBinding, Keyed, Message, NodeId, ValidationError,
};
use tracing::debug;

use crate::handle::{FormHandle, Values};
use crate::keymap::FormKeyMap;

/// A named entry of a [`Form`]
pub struct FormItem {
    name: String,
    component: Box<dyn Component>,
}

impl FormItem {
    pub fn new(name: impl Into<String>, component: impl Component + 'static) -> Self {
        Self {
            name: name.into(),
            component: Box::new(component),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component(&self) -> &dyn Component {
        self.component.as_ref()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormState {
    pub selected_index: usize,
    /// Furthest index ever reached
    pub step: usize,
    pub completed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FormConfig {
    pub keymap: FormKeyMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Navigation {
    Retreat,
    Advance,
}

pub struct Form {
    items: Vec<FormItem>,
    state: FormState,
    config: FormConfig,
    handle: Option<FormHandle>,
}

impl Form {
    pub fn new(items: Vec<FormItem>, config: FormConfig) -> Self {
        Self {
            items,
            state: FormState::default(),
            config,
            handle: None,
        }
    }

    /// Attach a handle that mirrors this form's values
    pub fn with_handle(mut self, handle: FormHandle) -> Self {
        self.handle = Some(handle);
        self.publish();
        self
    }

    pub fn handle(&self) -> Option<&FormHandle> {
        self.handle.as_ref()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn selected_index(&self) -> usize {
        self.state.selected_index
    }

    pub fn step(&self) -> usize {
        self.state.step
    }

    pub fn completed(&self) -> bool {
        self.state.completed
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Jump to `index` (clamped), raising the watermark if needed
    pub fn set_selected_index(&mut self, index: usize) -> Command {
        let index = index.min(self.items.len().saturating_sub(1));
        let changed = index != self.state.selected_index;
        self.state.selected_index = index;
        self.state.step = self.state.step.max(index);
        if !changed {
            return Command::none();
        }
        let cmd = self.broadcast_focus();
        self.publish();
        cmd
    }

    /// Set the watermark; never below the current selection
    pub fn set_step(&mut self, step: usize) {
        self.state.step = step.max(self.state.selected_index);
    }

    /// Value of the first item named `name`
    pub fn value(&self, name: &str) -> Option<String> {
        self.find(name)
            .and_then(|item| resolve_valued(item.component.as_ref()))
            .map(|valued| valued.value())
    }

    /// Validation error of the first item named `name`
    pub fn error(&self, name: &str) -> Option<ValidationError> {
        self.find(name)
            .and_then(|item| resolve_validatable(item.component.as_ref()))
            .and_then(|validatable| validatable.error().cloned())
    }

    pub fn values(&self) -> Values {
        let mut values = BTreeMap::new();
        for item in &self.items {
            values
                .entry(item.name.clone())
                .or_insert_with(|| self.value(&item.name));
        }
        values
    }

    pub fn errors(&self) -> BTreeMap<String, Option<ValidationError>> {
        let mut errors = BTreeMap::new();
        for item in &self.items {
            errors
                .entry(item.name.clone())
                .or_insert_with(|| self.error(&item.name));
        }
        errors
    }

    fn find(&self, name: &str) -> Option<&FormItem> {
        self.items.iter().find(|item| item.name == name)
    }

    fn retreat(&mut self) {
        self.state.completed = false;
        let landing = (0..self.state.selected_index)
            .rev()
            .find(|&i| !is_skipped(self.items[i].component.as_ref()));
        match landing {
            Some(index) => self.state.selected_index = index,
            None => debug!(
                index = self.state.selected_index,
                "nothing to retreat to"
            ),
        }
    }

    fn advance(&mut self) {
        let selected = self.state.selected_index;
        if let Some(validatable) = self
            .items
            .get_mut(selected)
            .and_then(|item| resolve_validatable_mut(item.component.as_mut()))
        {
            if !validatable.validate() {
                debug!(index = selected, "advance blocked by validation");
                return;
            }
        }

        let landing = (selected + 1..self.items.len())
            .find(|&i| !is_skipped(self.items[i].component.as_ref()));
        match landing {
            Some(index) => self.state.selected_index = index,
            None => {
                if !self.state.completed {
                    debug!(index = selected, "form completed");
                }
                self.state.completed = true;
            }
        }
        self.state.step = self.state.step.max(self.state.selected_index);
    }

    fn broadcast_focus(&mut self) -> Command {
        let selected = self.state.selected_index;
        self.items
            .iter_mut()
            .enumerate()
            .map(|(i, item)| item.component.update(Message::Focus(i == selected)))
            .collect()
    }

    fn route(&mut self, target: NodeId, msg: Message) -> Command {
        match self
            .items
            .iter_mut()
            .find(|item| item.component.contains_node(target))
        {
            Some(item) => item.component.update(msg),
            None => {
                debug!(%target, "no item owns addressed message");
                Command::none()
            }
        }
    }

    fn publish(&self) {
        if let Some(handle) = &self.handle {
            handle.publish(self.values());
        }
    }
}

impl Component for Form {
    fn init(&mut self) -> Command {
        let inits: Command = self.items.iter_mut().map(|i| i.component.init()).collect();
        let cmd = inits.and(self.broadcast_focus());
        self.publish();
        cmd
    }

    fn update(&mut self, msg: Message) -> Command {
        if let Some(target) = msg.target() {
            let cmd = self.route(target, msg);
            self.publish();
            return cmd;
        }

        let navigation = match &msg {
            Message::Key(key) if self.config.keymap.retreat.matches(key) => {
                Some(Navigation::Retreat)
            }
            Message::Key(key) if self.config.keymap.advance.matches(key) => {
                Some(Navigation::Advance)
            }
            _ => None,
        };

        let selected_index = self.state.selected_index;
        match navigation {
            Some(Navigation::Retreat) => self.retreat(),
            Some(Navigation::Advance) => self.advance(),
            None => {}
        }

        let mut cmd = Command::none();
        if self.state.selected_index != selected_index {
            debug!(
                from = selected_index,
                to = self.state.selected_index,
                step = self.state.step,
                "form selection changed"
            );
            cmd = cmd.and(self.broadcast_focus());
        }

        if navigation.is_none() {
            if let Some(item) = self.items.get_mut(self.state.selected_index) {
                cmd = cmd.and(item.component.update(msg));
            }
        }

        self.publish();
        cmd
    }

    fn view(&self) -> String {
        self.items
            .iter()
            .enumerate()
            .filter(|(i, item)| *i <= self.state.step && !is_hidden(item.component.as_ref()))
            .map(|(_, item)| item.component.view())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn contains_node(&self, id: NodeId) -> bool {
        self.items.iter().any(|item| item.component.contains_node(id))
    }

    fn as_keyed(&self) -> Option<&dyn Keyed> {
        Some(self)
    }
}

impl Keyed for Form {
    /// Bindings of the selected item, then retreat (past the first item),
    /// then advance
    fn keys(&self) -> Vec<KeyBinding> {
        let mut keys = self
            .items
            .get(self.state.selected_index)
            .and_then(|item| resolve_keyed(item.component.as_ref()))
            .map(|keyed| keyed.keys())
            .unwrap_or_default();
        if self.state.selected_index > 0 {
            keys.push(self.config.keymap.retreat.clone());
        }
        keys.push(self.config.keymap.advance.clone());
        keys
    }
}
