//! Display abstraction traits and shared components for the CDU
//!
//! This crate provides:
//! - `DisplayBackend` trait for the rendering surface (terminal, LCD, ...)
//! - `Style` and `Color` attributes for painted text
//! - `Screen`, a character buffer for static page content
//!
//! # Architecture
//!
//! The CDU face is a 24 x 10 character grid. The controller decides what
//! goes where; a backend only knows how to place bounded-width text with a
//! color attribute. Backends clip anything past the grid edge.

#![no_std]

pub mod backend;
pub mod screen;

// Re-export key types
pub use backend::{Color, DisplayBackend, DisplayError, Style};
pub use screen::{Screen, LINE_CAPACITY, SCREEN_COLS, SCREEN_ROWS};
