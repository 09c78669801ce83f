//! # Fuelgen Core Library
//!
//! A library for synthesizing physically-plausible pure-component fuel
//! databases and deriving blend properties from them, intended to feed
//! downstream property predictors.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Compound`,
//!   `Blend`, `ComponentTable`), the reference parameter tables (physical bounds,
//!   per-family property trends, seed compounds), and tabular I/O utilities.
//!
//! - **[`engine`]: The Logic Core.** The algorithmic layer: the rejection-sampling
//!   component generator, the bulk nonlinear blend mixer, the pure mixing formulas,
//!   and the blend-viability scorer.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer. It ties
//!   the `engine` and `core` together to execute the complete dataset-synthesis
//!   procedure (generate components, filter pools, mix blends) in one call.

pub mod core;
pub mod engine;
pub mod workflows;
