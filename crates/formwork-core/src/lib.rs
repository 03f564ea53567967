//! # formwork-core - Component Contract and Shared Infrastructure
//!
//! Foundation crate for formwork. Defines what a node of a form tree is, how
//! nodes talk to each other, and the infrastructure every other crate shares.
//!
//! ## Public API
//!
//! ### Components (`component`)
//! - [`Component`] - init / update / view contract plus capability accessors
//! - [`Keyed`], [`Hideable`], [`Skippable`], [`Validatable`], [`Valued`] - optional capabilities
//! - [`resolve_valued()`] and friends - depth-first capability resolution
//!
//! ### Messages and Effects (`message`, `command`)
//! - [`Message`] - everything a component can receive
//! - [`Command`] / [`Effect`] - deferred work for the runner
//!
//! ### Keys (`input_key`, `keys`)
//! - [`InputKey`] - terminal-independent key
//! - [`KeyBinding`] - configurable chords with help text
//!
//! ### Hashing (`hash`)
//! - [`ContentHash`] - digest of a serializable snapshot
//!
//! ### Error Handling (`error`)
//! - [`Error`], [`Result`], [`ResultExt`], [`ValidationError`]
//!
//! ## Prelude
//!
//! ```rust
//! use formwork_core::prelude::*;
//! ```

pub mod command;
pub mod component;
pub mod error;
pub mod hash;
pub mod input_key;
pub mod keys;
pub mod logging;
pub mod message;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

/// Prelude for common imports used throughout all formwork crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use command::{Command, Effect, Task};
pub use component::{
    has_capability, is_hidden, is_skipped, provides, resolve, resolve_hideable, resolve_keyed,
    resolve_skippable, resolve_validatable, resolve_validatable_mut, resolve_valued, Capability,
    Component, Hideable, Keyed, Skippable, Validatable, Valued,
};
pub use error::{Error, Result, ResultExt, ValidationError};
pub use hash::ContentHash;
pub use input_key::InputKey;
pub use keys::KeyBinding;
pub use message::{Loaded, Message, NodeId, RequestTag, SpinnerTick};
