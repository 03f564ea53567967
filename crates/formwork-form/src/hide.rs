//! Conditional visibility decorator

use formwork_core::{Command, Component, Hideable, Message};

/// Predicate consulted on every query, never cached
pub type Predicate = Box<dyn Fn() -> bool + Send>;

/// Renders nothing while its predicate holds.
///
/// A hidden node still receives every message, and without a [`Skip`]
/// somewhere in the same chain navigation passes over it too.
///
/// [`Skip`]: crate::Skip
pub struct Hide {
    child: Box<dyn Component>,
    hide: Predicate,
}

impl Hide {
    /// Wrap `child`, hidden until [`when`](Hide::when) says otherwise
    pub fn new(child: impl Component + 'static) -> Self {
        Self {
            child: Box::new(child),
            hide: Box::new(|| true),
        }
    }

    pub fn when(mut self, hide: impl Fn() -> bool + Send + 'static) -> Self {
        self.hide = Box::new(hide);
        self
    }
}

impl Component for Hide {
    fn init(&mut self) -> Command {
        self.child.init()
    }

    fn update(&mut self, msg: Message) -> Command {
        self.child.update(msg)
    }

    fn view(&self) -> String {
        if (self.hide)() {
            return String::new();
        }
        self.child.view()
    }

    fn child(&self) -> Option<&dyn Component> {
        Some(self.child.as_ref())
    }

    fn child_mut(&mut self) -> Option<&mut dyn Component> {
        Some(self.child.as_mut())
    }

    fn as_hideable(&self) -> Option<&dyn Hideable> {
        Some(self)
    }
}

impl Hideable for Hide {
    fn hidden(&self) -> bool {
        (self.hide)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::{is_hidden, is_skipped, InputKey};
    use formwork_widgets::{Text, TextStyle};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_hidden_by_default() {
        let hide = Hide::new(Text::new("secret", TextStyle::plain()));
        assert!(hide.hidden());
        assert_eq!(hide.view(), "");
    }

    #[test]
    fn test_predicate_evaluated_on_every_query() {
        let flag = Arc::new(AtomicBool::new(true));
        let hide = Hide::new(Text::new("note", TextStyle::plain())).when({
            let flag = flag.clone();
            move || flag.load(Ordering::SeqCst)
        });
        assert!(is_hidden(&hide));

        flag.store(false, Ordering::SeqCst);
        assert!(!is_hidden(&hide));
        assert_eq!(hide.view(), "note");
    }

    #[test]
    fn test_hidden_implies_skipped() {
        let hide = Hide::new(Text::new("x", TextStyle::plain()));
        assert!(is_skipped(&hide));
    }

    #[test]
    fn test_hidden_child_still_receives_messages() {
        use formwork_widgets::{Button, ButtonStyle};

        let mut hide = Hide::new(Button::new("Key", ButtonStyle::plain()));
        hide.update(Message::Focus(true));
        hide.update(Message::Key(InputKey::Enter));
        assert!(hide.view().is_empty());
        // Reveal and check the focus that arrived while hidden stuck
        let hide = hide.when(|| false);
        assert_eq!(hide.view(), "Key");
    }
}
