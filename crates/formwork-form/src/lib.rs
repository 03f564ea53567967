//! # formwork-form - Composite Nodes and Controllers
//!
//! Everything that owns other nodes: the decorators that add a single
//! capability to a child, the controllers that navigate a list of items, and
//! the loader that builds its child lazily.
//!
//! ## Public API
//!
//! ### Decorators
//! - [`Hide`] - conditional visibility
//! - [`Skip`] - conditional exclusion from navigation
//! - [`Field`] - label above a child
//!
//! ### Controllers
//! - [`Select`] - one active item out of a fixed list
//! - [`Form`] - navigation, validation gate and progressive disclosure
//! - [`FormHandle`] - sibling lookups for predicates and bindings
//!
//! ### Lazy Children
//! - [`Loader`] - rebuilds its child when a binding snapshot changes
//!
//! ### Leaves
//! - [`Input`] - text entry, [`Valued`](formwork_core::Valued) and
//!   [`Validatable`](formwork_core::Validatable)

pub mod field;
pub mod form;
pub mod handle;
pub mod hide;
pub mod input;
pub mod keymap;
pub mod loader;
pub mod select;
pub mod skip;

pub use field::{Field, FieldStyle};
pub use form::{Form, FormConfig, FormItem, FormState};
pub use handle::{FormHandle, Values};
pub use hide::{Hide, Predicate};
pub use input::{Input, InputConfig, InputStyle, Validator};
pub use keymap::{FormKeyMap, SelectKeyMap};
pub use loader::{Bindings, Factory, Loader, LoaderConfig};
pub use select::{Select, SelectConfig, SelectItem};
pub use skip::Skip;
