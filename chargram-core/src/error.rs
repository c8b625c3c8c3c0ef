use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building, persisting or sampling an n-gram model.
#[derive(Debug, Error)]
pub enum GenError {
	/// A file could not be opened, read or written.
	#[error("I/O error on {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// Persisted model bytes are truncated, malformed or inconsistent.
	#[error("malformed model data: {0}")]
	Format(String),

	/// The trailing gram of the text being generated is not a model key.
	#[error("gram {gram:?} is not present in the model")]
	LookupMiss { gram: String },

	/// Generation was requested from a model without any gram.
	#[error("cannot generate from an empty model")]
	EmptyModel,

	/// The order of a gram must be strictly positive.
	#[error("order must be >= 1, got {0}")]
	InvalidOrder(usize),

	/// The order supplied by the caller differs from the one stored with the model.
	#[error("order mismatch: model was built with order {expected}, got {found}")]
	OrderMismatch { expected: usize, found: usize },

	/// The custom seed cannot start a generation.
	#[error("invalid seed: {0}")]
	InvalidSeed(String),
}

impl GenError {
	/// Wraps an `io::Error` with the path it happened on.
	pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
		GenError::Io { path: path.into(), source }
	}

	pub(crate) fn format<S: Into<String>>(message: S) -> Self {
		GenError::Format(message.into())
	}
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GenError>;
