//! Core data types.
//!
//! - `ordered_map` is a hash map that remembers insertion order
//! - `texture` contains GPU texture and render target wrappers

pub mod ordered_map;
pub mod texture;
