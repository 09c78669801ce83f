//! # Workflows Module
//!
//! High-level entry points tying the engine and core together.
//!
//! - **Dataset Synthesis** ([`dataset`]) - The complete pipeline from
//!   reference tables to a finished component table and shuffled blend table,
//!   with progress reporting and reproducible seeding.

pub mod dataset;
