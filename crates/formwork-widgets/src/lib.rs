//! formwork-widgets - Leaf widgets for formwork
//!
//! Stateless-ish leaves that react to focus/active broadcasts and render
//! themselves to styled strings. None of them own children.

pub mod button;
pub mod option_item;
pub mod palette;
pub mod spinner;
pub mod style;
pub mod text;

pub use button::{Button, ButtonStyle};
pub use option_item::{OptionItem, OptionItemStyle};
pub use spinner::{Spinner, SpinnerStyle};
pub use style::Style;
pub use text::{Text, TextStyle};
