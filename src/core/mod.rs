//! Core types shared across the relay

pub mod error;

pub use error::{RelayError, RelayResult};
