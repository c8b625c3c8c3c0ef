use std::fs;
use std::path::Path;

use log::info;

use crate::codec;
use crate::error::{GenError, Result};
use crate::model::ngram_model::NGramModel;

/// Reads a whole text file.
///
/// A missing or unreadable file is an error, never an empty text.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
	let path = path.as_ref();
	fs::read_to_string(path).map_err(|e| GenError::io(path, e))
}

/// Writes `text` to a file, replacing it if it exists.
pub fn write_text<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
	let path = path.as_ref();
	fs::write(path, text).map_err(|e| GenError::io(path, e))
}

/// Encodes `model` and writes it to `path`.
pub fn save_model<P: AsRef<Path>>(path: P, model: &NGramModel) -> Result<()> {
	let path = path.as_ref();
	let bytes = codec::encode(model);
	fs::write(path, &bytes).map_err(|e| GenError::io(path, e))?;
	info!("saved {} grams of order {} to {} ({} bytes)", model.len(), model.order(), path.display(), bytes.len());
	Ok(())
}

/// Reads and decodes a model file.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<NGramModel> {
	let path = path.as_ref();
	let bytes = fs::read(path).map_err(|e| GenError::io(path, e))?;
	let model = codec::decode(&bytes)?;
	info!("loaded {} grams of order {} from {}", model.len(), model.order(), path.display());
	Ok(model)
}

/// Reads a model file and checks it was built with `order`.
///
/// # Errors
/// Returns `GenError::OrderMismatch` if the stored order differs.
pub fn load_model_with_order<P: AsRef<Path>>(path: P, order: usize) -> Result<NGramModel> {
	if order == 0 {
		return Err(GenError::InvalidOrder(order));
	}
	let model = load_model(path)?;
	if model.order() != order {
		return Err(GenError::OrderMismatch { expected: model.order(), found: order });
	}
	Ok(model)
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/model.cgrm"` → `"model"`
/// - `"model"` → `"model"`
pub fn model_name<P: AsRef<Path>>(path: P) -> Option<String> {
	path.as_ref().file_stem().map(|stem| stem.to_string_lossy().to_string())
}
