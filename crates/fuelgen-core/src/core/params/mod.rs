//! # Reference Parameters Module
//!
//! The static data that drives component generation: per-property physical
//! bounds, per-family linear carbon-count trends, valid carbon ranges, and
//! the seed compounds the generator interpolates from.
//!
//! Tables are loaded from TOML ([`tables::ReferenceTables::load`]) or taken
//! from the compiled-in default document ([`tables::ReferenceTables::builtin`]),
//! and are validated for internal consistency at load time. They contain no
//! logic and are consumed read-only by the engine.

pub mod tables;
