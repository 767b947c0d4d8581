//! Key matrix scanning

pub mod scanner;

pub use scanner::{MatrixScanner, ScanError};
