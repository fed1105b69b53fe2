#![forbid(unsafe_code)]

//! Shared geometry primitives for the gridkit packing engine.

pub mod geometry;

pub use geometry::{CellRect, Spacing};
