//! Navigation exclusion decorator

use formwork_core::{Command, Component, Message, Skippable};

use crate::hide::Predicate;

/// Excludes its child from form navigation while the predicate holds.
/// Rendering is unaffected.
pub struct Skip {
    child: Box<dyn Component>,
    skip: Predicate,
}

impl Skip {
    /// Wrap `child`, skipped until [`when`](Skip::when) says otherwise
    pub fn new(child: impl Component + 'static) -> Self {
        Self {
            child: Box::new(child),
            skip: Box::new(|| true),
        }
    }

    pub fn when(mut self, skip: impl Fn() -> bool + Send + 'static) -> Self {
        self.skip = Box::new(skip);
        self
    }
}

impl Component for Skip {
    fn init(&mut self) -> Command {
        self.child.init()
    }

    fn update(&mut self, msg: Message) -> Command {
        self.child.update(msg)
    }

    fn view(&self) -> String {
        self.child.view()
    }

    fn child(&self) -> Option<&dyn Component> {
        Some(self.child.as_ref())
    }

    fn child_mut(&mut self) -> Option<&mut dyn Component> {
        Some(self.child.as_mut())
    }

    fn as_skippable(&self) -> Option<&dyn Skippable> {
        Some(self)
    }
}

impl Skippable for Skip {
    fn skipped(&self) -> bool {
        (self.skip)()
    }
}
