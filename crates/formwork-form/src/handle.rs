//! Shared read-only view of a form's values for cross-field lookups
//!
//! Predicates and loader bindings often depend on sibling values, but they
//! have to be built before the form that owns those siblings exists. A
//! [`FormHandle`] is created first, cloned into those closures, and then
//! attached to the form, which republishes its values after every
//! `init`/`update`.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

pub type Values = BTreeMap<String, Option<String>>;

#[derive(Debug, Clone, Default)]
pub struct FormHandle {
    values: Arc<RwLock<Values>>,
}

impl FormHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last published value of `name`; `None` for unknown names and for
    /// items without a value
    pub fn value(&self, name: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .flatten()
    }

    /// Whether `name` currently holds exactly `expected`
    pub fn is(&self, name: &str, expected: &str) -> bool {
        self.value(name).as_deref() == Some(expected)
    }

    pub fn snapshot(&self) -> Values {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn publish(&self, values: Values) {
        *self.values.write().unwrap_or_else(PoisonError::into_inner) = values;
    }
}
