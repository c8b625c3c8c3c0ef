//! Character n-gram text generation library.
//!
//! This crate provides:
//! - A fixed-order character n-gram model built from a training text
//! - A random-walk generator sampling new text from that model
//! - A length-prefixed binary codec to persist trained models
//! - File helpers that fail loudly on missing or unwritable paths
//!
//! The model keeps every observed successor of a gram, duplicates included,
//! so sampling uniformly from a continuation set reproduces the frequencies
//! of the training corpus.

/// N-gram model, continuation sets and the generator walking them.
pub mod model;

/// Binary encoding of a trained model.
pub mod codec;

/// File helpers (text and model loading/saving).
pub mod io;

/// Error type shared by every operation of the crate.
pub mod error;

pub use error::{GenError, Result};
pub use model::generation_input::{GenerationInput, StartSeed};
pub use model::generator::{generate, Generator};
pub use model::ngram_model::NGramModel;
