//! # Engine Module
//!
//! The algorithmic layer of fuelgen: bounded stochastic generation with
//! validity constraints, nonlinear physical mixing rules, and the
//! dispersion-based viability heuristic.
//!
//! ## Architecture
//!
//! - **Generation** ([`generator`]) - Rejection-sampling synthesis of pure
//!   component records from the reference tables
//! - **Naming** ([`naming`]) - Deterministic family-specific chemical names
//! - **Mixing Formulas** ([`mixing`]) - The pure per-property blend rules
//! - **Bulk Mixing** ([`mixer`]) - Pool filtering and array-oriented blend production
//! - **Viability** ([`scorer`]) - The 0-100 miscibility/stability heuristic
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! All entry points are pure, single-threaded batch computations: callers
//! supply the RNG, and nothing here holds shared mutable state, so a built
//! component table may back any number of concurrent mixer/scorer calls.

pub mod error;
pub mod generator;
pub mod mixer;
pub mod mixing;
pub mod naming;
pub mod progress;
pub mod scorer;
