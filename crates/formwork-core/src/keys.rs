//! Key bindings: configurable key chords mapped to a semantic action
//!
//! A [`KeyBinding`] is configuration data, not behavior. Nodes ask a binding
//! whether an incoming key matches it, and expose their bindings upward so
//! the application can compose a help surface.

use serde::{Deserialize, Serialize};

use crate::input_key::InputKey;

/// One semantic binding: the keys that trigger it plus its help entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Keys that trigger this binding
    pub keys: Vec<InputKey>,

    /// Short description for the help surface
    #[serde(default)]
    pub help: String,

    /// Disabled bindings never match and are omitted from help
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl KeyBinding {
    pub fn new(keys: impl IntoIterator<Item = InputKey>, help: impl Into<String>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            help: help.into(),
            enabled: true,
        }
    }

    /// Whether `key` triggers this binding
    pub fn matches(&self, key: &InputKey) -> bool {
        self.enabled && self.keys.contains(key)
    }

    /// Key label for help text, e.g. `enter/tab`
    pub fn help_key(&self) -> String {
        self.keys
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_matches_any_of_its_keys() {
        let next = KeyBinding::new([InputKey::Enter, InputKey::Tab], "Next");
        assert!(next.matches(&InputKey::Enter));
        assert!(next.matches(&InputKey::Tab));
        assert!(!next.matches(&InputKey::BackTab));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut next = KeyBinding::new([InputKey::Enter], "Next");
        next.set_enabled(false);
        assert!(!next.matches(&InputKey::Enter));
    }

    #[test]
    fn test_help_key_joins_chords() {
        let prev = KeyBinding::new([InputKey::Left, InputKey::Up], "Previous selection");
        assert_eq!(prev.help_key(), "left/up");
    }

    #[test]
    fn test_binding_deserializes_from_toml() {
        let config = r#"
keys = ["shift+tab"]
help = "Previous"
"#;
        let binding: KeyBinding = toml::from_str(config).unwrap();
        assert_eq!(binding.keys, vec![InputKey::BackTab]);
        assert_eq!(binding.help, "Previous");
        assert!(binding.enabled);
    }
}
