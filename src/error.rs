//! Typed errors for the leaf components.
//!
//! Everything that touches the file system or the GPU returns [`anyhow::Result`];
//! the errors here are the ones callers are expected to match on.

use thiserror::Error;

/// Errors raised by strict lookups on an [`OrderedMap`](crate::data_structures::ordered_map::OrderedMap).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("key not found in ordered map")]
    KeyNotFound,
}

/// Errors raised when registering layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerError {
    #[error("layer identifier was not set")]
    EmptyIdentifier,

    #[error("duplicate layer identifier: {0}")]
    DuplicateIdentifier(String),
}
