//! # Drawform-Core
//!
//! Core types and utilities for the Drawform archery form
//! analysis engine: landmark enumeration, geometry primitives,
//! and the shared error taxonomy.

pub mod error;
pub mod geometry;
pub mod landmarks;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use landmarks::*;
pub use types::*;
