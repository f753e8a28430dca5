//! Utility functions

pub mod hash;

pub use hash::{fnv1a, fnv1a_lower};
