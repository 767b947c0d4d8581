//! Board-agnostic control logic for the CDU
//!
//! This crate contains all application logic that does not depend on
//! specific hardware or the bus client:
//!
//! - Key matrix layout and edge-detecting key mapper
//! - Page/mode state machine with menu and long-press handling
//! - Telemetry render pipeline owning the display buffer
//! - Output dispatch of key events and backlight levels
//! - The owned [`context::CduContext`] tying them together
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod context;
pub mod dispatch;
pub mod keymap;
pub mod render;
pub mod state;

pub use context::{CduContext, TickOutcome};
