//! Top-level module for the n-gram model.
//!
//! - Fixed-order model built from a text (`NGramModel`)
//! - Per-gram successor multisets (`Continuations`)
//! - Random-walk text generation (`Generator`)
//! - Generation configuration (`GenerationInput`)

/// Fixed-order character n-gram model (`order >= 1`).
///
/// Handles text ingestion and gram lookup.
pub mod ngram_model;

/// Ordered multiset of the characters observed after a gram.
pub mod continuations;

/// Random-walk generation over a built model.
pub mod generator;

/// Generation parameters: output length, seed strategy, random seed.
pub mod generation_input;

/// Uniform random selection and random source construction.
pub mod select;
