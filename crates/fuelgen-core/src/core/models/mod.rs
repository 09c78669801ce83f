//! # Core Models Module
//!
//! Data structures representing the engine's inputs and outputs.
//!
//! ## Key Components
//!
//! - [`compound`] - A pure chemical component with its family, formula, and
//!   physical property set (each property independently present or not applicable)
//! - [`table`] - The immutable, name-indexed component table produced by the generator
//! - [`blend`] - A two-component fuel blend row with its derived property vector
//! - [`recipe`] - A transient, caller-supplied blend recipe for viability scoring
//!
//! A [`compound::Compound`] is created once (seed copy or synthesized), is
//! immutable thereafter, and is only ever read by the mixer and scorer.

pub mod blend;
pub mod compound;
pub mod recipe;
pub mod table;
