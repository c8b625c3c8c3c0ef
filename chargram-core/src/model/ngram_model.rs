use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use log::{debug, warn};
use rand::Rng;

use super::continuations::Continuations;
use super::select;
use crate::error::{GenError, Result};

/// Represents a character n-gram model.
///
/// The `NGramModel` maps every gram (window of `order` characters) seen in a
/// training text to the characters that followed it.
///
/// # Responsibilities
/// - Build the mapping from a text in a single scan
/// - Look up the continuation set of a gram
/// - Pick a random gram to start a generation
///
/// # Invariants
/// - `order` is always >= 1
/// - Every key is exactly `order` characters long
/// - No continuation set is empty
/// - Keys are sorted, so iteration order does not depend on the process
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NGramModel {
	/// Number of characters in a gram
	order: usize,

	/// Mapping from a gram to the characters observed after it
	grams: BTreeMap<String, Continuations>,
}

impl NGramModel {
	/// Creates an empty model of the given order.
	///
	/// # Errors
	/// Returns `GenError::InvalidOrder` if `order == 0`.
	pub fn new(order: usize) -> Result<Self> {
		if order == 0 {
			return Err(GenError::InvalidOrder(order));
		}
		Ok(Self { order, grams: BTreeMap::new() })
	}

	/// Builds a model of order `order` from `text`.
	///
	/// For every window `text[i..i + order]` followed by a character, that
	/// character is appended to the window's continuation set. The last window
	/// has no successor and contributes nothing.
	///
	/// A text of at most `order` characters yields an empty model.
	///
	/// # Errors
	/// Returns `GenError::InvalidOrder` if `order == 0`.
	pub fn build(text: &str, order: usize) -> Result<Self> {
		let mut model = Self::new(order)?;

		let chars: Vec<char> = text.chars().collect();
		if chars.len() <= order {
			warn!("text has {} characters, too short for order {order}: model is empty", chars.len());
			return Ok(model);
		}

		for window in chars.windows(order + 1) {
			let gram: String = window[..order].iter().collect();
			model.grams.entry(gram).or_default().push(window[order]);
		}

		debug!("built order {order} model: {} grams from {} characters", model.grams.len(), chars.len());
		Ok(model)
	}

	/// Order (gram length in characters) of the model.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct grams.
	pub fn len(&self) -> usize {
		self.grams.len()
	}

	pub fn is_empty(&self) -> bool {
		self.grams.is_empty()
	}

	/// Continuation set of `gram`, or `None` if the gram was never seen.
	pub fn continuations(&self, gram: &str) -> Option<&Continuations> {
		self.grams.get(gram)
	}

	/// Iterates over `(gram, continuations)` pairs in key order.
	pub fn grams(&self) -> impl Iterator<Item = (&str, &Continuations)> {
		self.grams.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Returns a uniformly random gram, every distinct gram being equally likely.
	///
	/// Returns `None` if the model is empty.
	pub fn random_gram<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		select::pick_from(self.grams.keys(), rng).map(String::as_str)
	}

	/// Inserts a whole continuation set for a gram not yet present.
	///
	/// Used when rebuilding a model from persisted data.
	///
	/// # Errors
	/// Returns `GenError::Format` if the gram has the wrong length, is already
	/// present, or if the set is empty.
	pub(crate) fn insert(&mut self, gram: String, continuations: Continuations) -> Result<()> {
		let len = gram.chars().count();
		if len != self.order {
			return Err(GenError::format(format!(
				"gram {gram:?} has {len} characters, expected {}",
				self.order
			)));
		}
		if continuations.is_empty() {
			return Err(GenError::format(format!("gram {gram:?} has no continuation")));
		}
		match self.grams.entry(gram) {
			Entry::Occupied(e) => Err(GenError::format(format!("duplicate gram {:?}", e.key()))),
			Entry::Vacant(e) => {
				e.insert(continuations);
				Ok(())
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::select::make_rng;

	#[test]
	fn zero_order_is_rejected() {
		assert!(matches!(NGramModel::build("abc", 0), Err(GenError::InvalidOrder(0))));
	}

	#[test]
	fn continuation_order_follows_the_text() {
		let model = NGramModel::build("the theremin is theirs", 3).unwrap();
		let the = model.continuations("the").unwrap();
		assert_eq!(the.as_slice(), &[' ', 'r', 'i']);
	}

	#[test]
	fn every_successor_is_recorded() {
		let text = "abracadabra, abracadabra";
		let chars: Vec<char> = text.chars().collect();
		for order in 1..chars.len() {
			let model = NGramModel::build(text, order).unwrap();
			assert!(model.grams().all(|(gram, _)| gram.chars().count() == order));
			for i in 0..chars.len() - order {
				let gram: String = chars[i..i + order].iter().collect();
				let set = model.continuations(&gram).unwrap();
				assert!(set.contains(chars[i + order]));
			}
		}
	}

	#[test]
	fn overlapping_occurrences_share_a_set() {
		let model = NGramModel::build("aaaa", 2).unwrap();
		assert_eq!(model.len(), 1);
		assert_eq!(model.continuations("aa").unwrap().as_slice(), &['a', 'a']);
	}

	#[test]
	fn short_text_gives_an_empty_model() {
		assert!(NGramModel::build("ab", 3).unwrap().is_empty());
		assert!(NGramModel::build("abc", 3).unwrap().is_empty());
		assert!(NGramModel::build("", 1).unwrap().is_empty());
	}

	#[test]
	fn multibyte_characters_are_single_positions() {
		let model = NGramModel::build("héhé!", 2).unwrap();
		assert_eq!(model.continuations("hé").unwrap().as_slice(), &['h', '!']);
		assert_eq!(model.continuations("éh").unwrap().as_slice(), &['é']);
	}

	#[test]
	fn random_gram_is_a_key() {
		let model = NGramModel::build("hello world", 2).unwrap();
		let mut rng = make_rng(Some(5));
		for _ in 0..20 {
			let gram = model.random_gram(&mut rng).unwrap();
			assert!(model.continuations(gram).is_some());
		}
	}

	#[test]
	fn insert_checks_length_and_duplicates() {
		let mut model = NGramModel::new(2).unwrap();
		assert!(model.insert("ab".into(), vec!['c'].into()).is_ok());
		assert!(matches!(model.insert("ab".into(), vec!['d'].into()), Err(GenError::Format(_))));
		assert!(matches!(model.insert("abc".into(), vec!['d'].into()), Err(GenError::Format(_))));
		assert!(matches!(model.insert("cd".into(), Continuations::new()), Err(GenError::Format(_))));
	}
}
