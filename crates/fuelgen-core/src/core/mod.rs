//! # Core Module
//!
//! Fundamental building blocks of the fuelgen library: the stateless data
//! models for compounds, blends, and recipes, the reference parameter tables
//! that drive generation, and tabular I/O.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Compounds, the component table, blends, and recipes
//! - **Reference Parameters** ([`params`]) - Physical property bounds, per-family
//!   carbon-count trends, carbon ranges, and seed compounds, loaded from TOML
//! - **Tabular I/O** ([`io`]) - CSV readers/writers for the component and blend tables
//!
//! Everything in this module is immutable after construction and free of
//! randomness; all stochastic behavior lives in [`crate::engine`].

pub mod io;
pub mod models;
pub mod params;
