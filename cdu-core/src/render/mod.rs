//! Telemetry rendering
//!
//! Simulator line updates are decoded, stored in the [`DisplayBuffer`]
//! and painted only while the Sim page is showing.

pub mod buffer;
pub mod pipeline;

pub use buffer::DisplayBuffer;
pub use pipeline::{ActiveColorLevel, DropReason, LineOutcome, RenderPipeline};
