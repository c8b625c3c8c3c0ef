//! Binary layout of a persisted model.
//!
//! Every integer is a little-endian `u64`.
//!
//! ```text
//! header   magic "CGRM" | version (1 byte) | order
//! body     entry count
//!          per entry: key length | key bytes
//!                     continuation count
//!                     per continuation: length | UTF-8 bytes of one char
//! ```
//!
//! Entries are written in key order, so encoding a model is deterministic.
//! `decode_headerless` reads a bare body, for files written without header.

use log::debug;

use crate::error::{GenError, Result};
use crate::model::continuations::Continuations;
use crate::model::ngram_model::NGramModel;

pub const MAGIC: &[u8; 4] = b"CGRM";
pub const VERSION: u8 = 1;

const U64_LEN: usize = std::mem::size_of::<u64>();
/// Smallest encoded entry: a one-byte key and a single one-byte continuation.
const MIN_ENTRY_LEN: usize = 3 * U64_LEN + 2;

/// Encodes `model`, header included.
pub fn encode(model: &NGramModel) -> Vec<u8> {
	let mut out = Vec::new();
	out.extend_from_slice(MAGIC);
	out.push(VERSION);
	write_u64(&mut out, model.order());
	encode_body(model, &mut out);
	debug!("encoded {} grams into {} bytes", model.len(), out.len());
	out
}

/// Encodes only the body (no magic, version or order).
pub fn encode_headerless(model: &NGramModel) -> Vec<u8> {
	let mut out = Vec::new();
	encode_body(model, &mut out);
	out
}

fn encode_body(model: &NGramModel, out: &mut Vec<u8>) {
	write_u64(out, model.len());
	let mut buf = [0u8; 4];
	for (gram, continuations) in model.grams() {
		write_u64(out, gram.len());
		out.extend_from_slice(gram.as_bytes());
		write_u64(out, continuations.len());
		for c in continuations.as_slice() {
			let bytes = c.encode_utf8(&mut buf).as_bytes();
			write_u64(out, bytes.len());
			out.extend_from_slice(bytes);
		}
	}
}

fn write_u64(out: &mut Vec<u8>, value: usize) {
	out.extend_from_slice(&(value as u64).to_le_bytes());
}

/// Decodes a model written by [`encode`].
///
/// # Errors
/// Returns `GenError::Format` if the header is wrong, if any declared length
/// exceeds the remaining bytes, if a gram or continuation is inconsistent
/// with the order, or if bytes remain after the last entry.
pub fn decode(bytes: &[u8]) -> Result<NGramModel> {
	let mut reader = Reader::new(bytes);

	if reader.take(MAGIC.len())? != MAGIC {
		return Err(GenError::format("missing model header"));
	}
	let version = reader.take(1)?[0];
	if version != VERSION {
		return Err(GenError::format(format!("unsupported model version {version}")));
	}
	let order = reader.read_len()?;
	if order == 0 {
		return Err(GenError::format("stored order is 0"));
	}

	decode_body(reader, order)
}

/// Decodes a bare body written by [`encode_headerless`].
///
/// The order is not stored in such data and must be supplied by the caller;
/// every key is checked against it.
pub fn decode_headerless(bytes: &[u8], order: usize) -> Result<NGramModel> {
	if order == 0 {
		return Err(GenError::InvalidOrder(order));
	}
	decode_body(Reader::new(bytes), order)
}

fn decode_body(mut reader: Reader<'_>, order: usize) -> Result<NGramModel> {
	let mut model = NGramModel::new(order)?;

	let count = reader.read_count(MIN_ENTRY_LEN)?;
	for _ in 0..count {
		let gram = reader.read_str()?.to_owned();
		let continuation_count = reader.read_count(U64_LEN + 1)?;
		let mut chars = Vec::with_capacity(continuation_count);
		for _ in 0..continuation_count {
			let s = reader.read_str()?;
			let mut it = s.chars();
			match (it.next(), it.next()) {
				(Some(c), None) => chars.push(c),
				_ => {
					return Err(GenError::format(format!(
						"continuation {s:?} of gram {gram:?} is not a single character"
					)));
				}
			}
		}
		model.insert(gram, Continuations::from(chars))?;
	}

	if reader.remaining() != 0 {
		return Err(GenError::format(format!("{} trailing bytes after last entry", reader.remaining())));
	}

	debug!("decoded {} grams of order {order}", model.len());
	Ok(model)
}

/// Bounds-checked cursor over the encoded bytes.
struct Reader<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Reader<'a> {
	fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	fn remaining(&self) -> usize {
		self.bytes.len() - self.pos
	}

	fn take(&mut self, len: usize) -> Result<&'a [u8]> {
		if len > self.remaining() {
			return Err(GenError::format(format!(
				"declared length {len} exceeds the {} remaining bytes at offset {}",
				self.remaining(),
				self.pos
			)));
		}
		let slice = &self.bytes[self.pos..self.pos + len];
		self.pos += len;
		Ok(slice)
	}

	fn read_u64(&mut self) -> Result<u64> {
		let mut raw = [0u8; U64_LEN];
		raw.copy_from_slice(self.take(U64_LEN)?);
		Ok(u64::from_le_bytes(raw))
	}

	/// Reads a length that must fit in the remaining bytes.
	fn read_len(&mut self) -> Result<usize> {
		let value = self.read_u64()?;
		usize::try_from(value).map_err(|_| GenError::format(format!("length {value} does not fit in memory")))
	}

	/// Reads an item count, rejecting counts that cannot fit in the remaining
	/// bytes given that each item takes at least `min_item_len` bytes.
	fn read_count(&mut self, min_item_len: usize) -> Result<usize> {
		let count = self.read_len()?;
		if count > self.remaining() / min_item_len {
			return Err(GenError::format(format!(
				"declared count {count} exceeds the {} remaining bytes",
				self.remaining()
			)));
		}
		Ok(count)
	}

	fn read_str(&mut self) -> Result<&'a str> {
		let len = self.read_len()?;
		let bytes = self.take(len)?;
		std::str::from_utf8(bytes).map_err(|e| GenError::format(format!("invalid UTF-8: {e}")))
	}
}
