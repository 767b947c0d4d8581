//! Page and connectivity state machine
//!
//! Defines what the CDU shows and what it does with key events.
//! The page machine is explicit, finite, and deterministic; timing and
//! key interpretation live in [`crate::context`].

pub mod events;
pub mod long_press;
pub mod machine;
pub mod menu;
pub mod pages;

pub use events::Event;
pub use long_press::LongPressTimer;
pub use machine::{ConnectivityMode, Page};
pub use menu::MenuSelection;
