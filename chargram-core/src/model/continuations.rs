use rand::Rng;

use super::select;

/// Characters observed right after a given gram.
///
/// This is a probability distribution stored as a multiset: a character seen
/// `k` times in the training text is stored `k` times, and drawing uniformly
/// over positions yields it with probability `k / len`.
///
/// ## Invariants
/// - Insertion order is the order of appearance in the training text
/// - A set reachable from a model is never empty
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Continuations {
	chars: Vec<char>,
}

impl Continuations {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self { chars: Vec::new() }
	}

	/// Records one more occurrence of `next_char`.
	pub fn push(&mut self, next_char: char) {
		self.chars.push(next_char);
	}

	/// Draws one character, each stored occurrence with the same probability.
	///
	/// Returns `None` if the set is empty.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<char> {
		select::pick(&self.chars, rng).copied()
	}

	/// Number of stored occurrences (duplicates included).
	pub fn len(&self) -> usize {
		self.chars.len()
	}

	pub fn is_empty(&self) -> bool {
		self.chars.is_empty()
	}

	/// Occurrences in insertion order.
	pub fn as_slice(&self) -> &[char] {
		&self.chars
	}

	pub fn contains(&self, c: char) -> bool {
		self.chars.contains(&c)
	}
}

impl From<Vec<char>> for Continuations {
	fn from(chars: Vec<char>) -> Self {
		Self { chars }
	}
}
