//! Shared utilities for the skelanim CLI

pub mod table;

pub use table::*;
