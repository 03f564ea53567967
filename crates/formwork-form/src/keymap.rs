//! Default key maps for the navigation controllers

use formwork_core::{InputKey, KeyBinding};
use serde::{Deserialize, Serialize};

/// Form navigation: retreat to the previous item, advance to the next
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormKeyMap {
    pub retreat: KeyBinding,
    pub advance: KeyBinding,
}

impl Default for FormKeyMap {
    fn default() -> Self {
        Self {
            retreat: KeyBinding::new([InputKey::BackTab], "Previous"),
            advance: KeyBinding::new([InputKey::Enter, InputKey::Tab], "Next"),
        }
    }
}

/// Select navigation between sibling options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectKeyMap {
    pub previous: KeyBinding,
    pub next: KeyBinding,
}

impl Default for SelectKeyMap {
    fn default() -> Self {
        Self {
            previous: KeyBinding::new([InputKey::Left, InputKey::Up], "Previous selection"),
            next: KeyBinding::new([InputKey::Right, InputKey::Down], "Next selection"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_keys() {
        let keymap = FormKeyMap::default();
        assert!(keymap.retreat.matches(&InputKey::BackTab));
        assert!(keymap.advance.matches(&InputKey::Enter));
        assert!(keymap.advance.matches(&InputKey::Tab));
        assert!(!keymap.advance.matches(&InputKey::BackTab));
    }

    #[test]
    fn test_default_select_keys() {
        let keymap = SelectKeyMap::default();
        assert_eq!(keymap.previous.help_key(), "left/up");
        assert_eq!(keymap.next.help_key(), "right/down");
    }

    #[test]
    fn test_partial_override_keeps_other_default() {
        let keymap: FormKeyMap = serde_json::from_str(
            r#"{ "advance": { "keys": ["ctrl+n"], "help": "Next" } }"#,
        )
        .unwrap();
        assert!(keymap.advance.matches(&InputKey::CharCtrl('n')));
        assert!(!keymap.advance.matches(&InputKey::Enter));
        assert_eq!(keymap.retreat, FormKeyMap::default().retreat);
    }
}
