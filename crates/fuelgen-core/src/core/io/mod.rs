//! # Tabular I/O Module
//!
//! CSV encoding of the engine's two output tables and decoding of a
//! previously written component table. The core mandates no particular
//! persistence format beyond rows of named fields; CSV is the flat tabular
//! representation exchanged with the training collaborator.

pub mod csv;
