//! Hardware driver implementations
//!
//! This crate provides the CDU's input hardware on top of the traits in
//! `cdu-hal`:
//!
//! - MCP23017 port expander (column drive, row sense)
//! - Key matrix scanner merging expander rows with a discrete GPIO row

#![no_std]
#![deny(unsafe_code)]

pub mod expander;
pub mod matrix;
