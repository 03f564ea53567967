//! The component contract and optional capabilities
//!
//! Every node in a form tree implements [`Component`]. On top of that a node
//! may provide any of a closed set of capabilities ([`Capability`]). A node
//! advertises a capability by overriding the matching `as_*` accessor; a node
//! that wraps exactly one other node overrides [`Component::child`] so that
//! capabilities owned deeper in the chain stay reachable.
//!
//! Capability lookups go through the `resolve_*` functions, which search the
//! node itself first and then walk down the child chain until a provider is
//! found or a node without a child ends the search.

use crate::command::Command;
use crate::error::ValidationError;
use crate::keys::KeyBinding;
use crate::message::{Message, NodeId};

/// A node of the form tree
pub trait Component: Send {
    /// Effects to run when the node is first mounted
    fn init(&mut self) -> Command {
        Command::none()
    }

    /// Consume one message, mutate state, describe follow-up effects
    fn update(&mut self, msg: Message) -> Command;

    /// Render the node
    fn view(&self) -> String;

    /// The single owned sub-node this node delegates to
    fn child(&self) -> Option<&dyn Component> {
        None
    }

    fn child_mut(&mut self) -> Option<&mut dyn Component> {
        None
    }

    /// Whether this node, or anything below it, answers to `id`.
    ///
    /// Used to route addressed messages. Containers override this to search
    /// all of their items; nodes that own a [`NodeId`] check it first.
    fn contains_node(&self, id: NodeId) -> bool {
        self.child().is_some_and(|child| child.contains_node(id))
    }

    fn as_keyed(&self) -> Option<&dyn Keyed> {
        None
    }

    fn as_hideable(&self) -> Option<&dyn Hideable> {
        None
    }

    fn as_skippable(&self) -> Option<&dyn Skippable> {
        None
    }

    fn as_validatable(&self) -> Option<&dyn Validatable> {
        None
    }

    fn as_validatable_mut(&mut self) -> Option<&mut dyn Validatable> {
        None
    }

    fn as_valued(&self) -> Option<&dyn Valued> {
        None
    }
}

impl<C: Component + ?Sized> Component for Box<C> {
    fn init(&mut self) -> Command {
        (**self).init()
    }

    fn update(&mut self, msg: Message) -> Command {
        (**self).update(msg)
    }

    fn view(&self) -> String {
        (**self).view()
    }

    fn child(&self) -> Option<&dyn Component> {
        (**self).child()
    }

    fn child_mut(&mut self) -> Option<&mut dyn Component> {
        (**self).child_mut()
    }

    fn contains_node(&self, id: NodeId) -> bool {
        (**self).contains_node(id)
    }

    fn as_keyed(&self) -> Option<&dyn Keyed> {
        (**self).as_keyed()
    }

    fn as_hideable(&self) -> Option<&dyn Hideable> {
        (**self).as_hideable()
    }

    fn as_skippable(&self) -> Option<&dyn Skippable> {
        (**self).as_skippable()
    }

    fn as_validatable(&self) -> Option<&dyn Validatable> {
        (**self).as_validatable()
    }

    fn as_validatable_mut(&mut self) -> Option<&mut dyn Validatable> {
        (**self).as_validatable_mut()
    }

    fn as_valued(&self) -> Option<&dyn Valued> {
        (**self).as_valued()
    }
}

/// Contributes key bindings to the help surface
pub trait Keyed {
    fn keys(&self) -> Vec<KeyBinding>;
}

/// Can be excluded from rendering (and, lacking a [`Skippable`], from
/// navigation)
pub trait Hideable {
    fn hidden(&self) -> bool;
}

/// Can be excluded from navigation only
pub trait Skippable {
    fn skipped(&self) -> bool;
}

/// Can check its own state and report a validation error
pub trait Validatable {
    /// Recompute the error; `true` when valid
    fn validate(&mut self) -> bool;

    /// Error from the most recent [`validate`](Validatable::validate) call
    fn error(&self) -> Option<&ValidationError>;
}

/// Exposes a string value
pub trait Valued {
    fn value(&self) -> String;
}

/// The closed set of optional capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    HasChild,
    Keyed,
    Hideable,
    Skippable,
    Validatable,
    Valued,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::HasChild,
        Capability::Keyed,
        Capability::Hideable,
        Capability::Skippable,
        Capability::Validatable,
        Capability::Valued,
    ];
}

/// Whether `node` itself provides `capability`, without looking at children
pub fn provides(node: &dyn Component, capability: Capability) -> bool {
    match capability {
        Capability::HasChild => node.child().is_some(),
        Capability::Keyed => node.as_keyed().is_some(),
        Capability::Hideable => node.as_hideable().is_some(),
        Capability::Skippable => node.as_skippable().is_some(),
        Capability::Validatable => node.as_validatable().is_some(),
        Capability::Valued => node.as_valued().is_some(),
    }
}

/// Whether `capability` is provided anywhere along the child chain of `node`
pub fn has_capability(node: &dyn Component, capability: Capability) -> bool {
    provides(node, capability) || node.child().is_some_and(|c| has_capability(c, capability))
}

/// Depth-first search down the child chain for the first node `probe`
/// accepts.
pub fn resolve<'a, T: ?Sized + 'a>(
    node: &'a dyn Component,
    probe: &dyn Fn(&'a dyn Component) -> Option<&'a T>,
) -> Option<&'a T> {
    probe(node).or_else(|| node.child().and_then(|child| resolve(child, probe)))
}

pub fn resolve_keyed(node: &dyn Component) -> Option<&dyn Keyed> {
    resolve(node, &|n| n.as_keyed())
}

pub fn resolve_hideable(node: &dyn Component) -> Option<&dyn Hideable> {
    resolve(node, &|n| n.as_hideable())
}

pub fn resolve_skippable(node: &dyn Component) -> Option<&dyn Skippable> {
    resolve(node, &|n| n.as_skippable())
}

pub fn resolve_validatable(node: &dyn Component) -> Option<&dyn Validatable> {
    resolve(node, &|n| n.as_validatable())
}

pub fn resolve_valued(node: &dyn Component) -> Option<&dyn Valued> {
    resolve(node, &|n| n.as_valued())
}

pub fn resolve_validatable_mut(node: &mut dyn Component) -> Option<&mut dyn Validatable> {
    if node.as_validatable().is_some() {
        return node.as_validatable_mut();
    }
    node.child_mut().and_then(resolve_validatable_mut)
}

/// Whether navigation must pass over `node`.
///
/// A resolved [`Skippable`] decides; without one a resolved [`Hideable`]
/// decides; otherwise the node is navigable.
pub fn is_skipped(node: &dyn Component) -> bool {
    if let Some(skippable) = resolve_skippable(node) {
        return skippable.skipped();
    }
    resolve_hideable(node).is_some_and(|h| h.hidden())
}

/// Whether rendering must omit `node`
pub fn is_hidden(node: &dyn Component) -> bool {
    resolve_hideable(node).is_some_and(|h| h.hidden())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_key::InputKey;

    struct Leaf {
        value: String,
        error: Option<ValidationError>,
    }

    impl Leaf {
        fn new(value: &str) -> Self {
            Self {
                value: value.to_string(),
                error: None,
            }
        }
    }

    impl Component for Leaf {
        fn update(&mut self, _msg: Message) -> Command {
            Command::none()
        }

        fn view(&self) -> String {
            self.value.clone()
        }

        fn as_validatable(&self) -> Option<&dyn Validatable> {
            Some(self)
        }

        fn as_validatable_mut(&mut self) -> Option<&mut dyn Validatable> {
            Some(self)
        }

        fn as_valued(&self) -> Option<&dyn Valued> {
            Some(self)
        }
    }

    impl Validatable for Leaf {
        fn validate(&mut self) -> bool {
            self.error = self
                .value
                .is_empty()
                .then(|| ValidationError::new("required"));
            self.error.is_none()
        }

        fn error(&self) -> Option<&ValidationError> {
            self.error.as_ref()
        }
    }

    impl Valued for Leaf {
        fn value(&self) -> String {
            self.value.clone()
        }
    }

    struct Wrap {
        child: Box<dyn Component>,
        hidden: bool,
    }

    impl Component for Wrap {
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

        fn as_hideable(&self) -> Option<&dyn Hideable> {
            Some(self)
        }

        fn as_keyed(&self) -> Option<&dyn Keyed> {
            Some(self)
        }
    }

    impl Hideable for Wrap {
        fn hidden(&self) -> bool {
            self.hidden
        }
    }

    impl Keyed for Wrap {
        fn keys(&self) -> Vec<KeyBinding> {
            vec![KeyBinding::new([InputKey::Char('x')], "wrap")]
        }
    }

    fn wrapped(value: &str, hidden: bool) -> Wrap {
        Wrap {
            child: Box::new(Wrap {
                child: Box::new(Leaf::new(value)),
                hidden: false,
            }),
            hidden,
        }
    }

    #[test]
    fn test_value_resolves_through_two_wrappers() {
        let node = wrapped("abc", false);
        assert_eq!(resolve_valued(&node).map(|v| v.value()), Some("abc".into()));
    }

    #[test]
    fn test_first_provider_wins() {
        let node = wrapped("abc", true);
        // The outer wrapper answers before the inner one is consulted
        assert!(resolve_hideable(&node).unwrap().hidden());
    }

    #[test]
    fn test_validate_mut_reaches_leaf() {
        let mut node = wrapped("", false);
        let validatable = resolve_validatable_mut(&mut node).unwrap();
        assert!(!validatable.validate());
        assert_eq!(
            resolve_validatable(&node).and_then(|v| v.error()).map(|e| e.message()),
            Some("required")
        );
    }

    #[test]
    fn test_missing_capability_is_none() {
        let leaf = Leaf::new("v");
        assert!(resolve_keyed(&leaf).is_none());
        assert!(resolve_skippable(&leaf).is_none());
        assert!(!is_skipped(&leaf));
        assert!(!is_hidden(&leaf));
    }

    #[test]
    fn test_hidden_implies_skipped_without_skippable() {
        let node = wrapped("v", true);
        assert!(is_hidden(&node));
        assert!(is_skipped(&node));
    }

    #[test]
    fn test_provides_is_shallow_has_capability_is_deep() {
        let node = wrapped("v", false);
        assert!(!provides(&node, Capability::Valued));
        assert!(has_capability(&node, Capability::Valued));
        assert!(provides(&node, Capability::HasChild));
        assert!(!has_capability(&Leaf::new("v"), Capability::HasChild));
    }

    #[test]
    fn test_boxed_component_forwards_capabilities() {
        let boxed: Box<dyn Component> = Box::new(wrapped("abc", true));
        assert!(is_hidden(&boxed));
        assert_eq!(resolve_valued(&boxed).map(|v| v.value()), Some("abc".into()));
        assert!(resolve_keyed(&boxed).is_some());
    }

    #[test]
    fn test_contains_node_defaults_to_false() {
        let node = wrapped("v", false);
        assert!(!node.contains_node(NodeId::next()));
    }
}
