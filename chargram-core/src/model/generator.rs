use log::debug;
use rand::Rng;
use rand::rngs::StdRng;

use super::generation_input::StartSeed;
use super::ngram_model::NGramModel;
use super::select::make_rng;
use crate::error::{GenError, Result};

/// Random-walk generator over a borrowed n-gram model.
///
/// # Responsibilities
/// - Choose the starting gram (random key or custom text)
/// - Extend the text one character at a time from the continuation sets
/// - Own the random source, so a seeded generator is reproducible
///
/// The model is only read; any number of generators can share it.
#[derive(Debug)]
pub struct Generator<'m, R: Rng = StdRng> {
	model: &'m NGramModel,
	order: usize,
	rng: R,
}

impl<'m> Generator<'m, StdRng> {
	/// Creates a generator using the model's own order.
	///
	/// `rng_seed` makes the output reproducible; `None` draws from entropy.
	pub fn new(model: &'m NGramModel, rng_seed: Option<u64>) -> Self {
		Self::with_rng(model, model.order(), make_rng(rng_seed))
	}
}

impl<'m, R: Rng> Generator<'m, R> {
	/// Creates a generator with an explicit order and random source.
	///
	/// The order should match the one the model was built with; if it does
	/// not, generation fails with `GenError::LookupMiss` on the first step.
	pub fn with_rng(model: &'m NGramModel, order: usize, rng: R) -> Self {
		Self { model, order, rng }
	}

	/// Generates `length` characters after the seed.
	///
	/// See [`generate`].
	pub fn generate(&mut self, length: usize, seed: &StartSeed) -> Result<String> {
		generate(self.model, self.order, length, seed, &mut self.rng)
	}
}

/// Generates text by walking `model`.
///
/// # Behavior
/// - `StartSeed::Random` starts from a uniformly chosen gram; the result is
///   then `order + length` characters long.
/// - `StartSeed::Custom` starts from the given text.
/// - Each step looks up the last `order` characters (the whole text if it is
///   shorter) and appends a character drawn uniformly from its continuation
///   set, duplicates included.
///
/// # Errors
/// - `GenError::InvalidOrder` if `order == 0`
/// - `GenError::EmptyModel` if the model has no gram
/// - `GenError::InvalidSeed` if a custom seed is empty
/// - `GenError::LookupMiss` if the trailing gram is not in the model
pub fn generate<R: Rng + ?Sized>(
	model: &NGramModel,
	order: usize,
	length: usize,
	seed: &StartSeed,
	rng: &mut R,
) -> Result<String> {
	if order == 0 {
		return Err(GenError::InvalidOrder(order));
	}
	if model.is_empty() {
		return Err(GenError::EmptyModel);
	}

	let start = match seed {
		StartSeed::Random => model.random_gram(rng).ok_or(GenError::EmptyModel)?.to_owned(),
		StartSeed::Custom(s) if s.is_empty() => {
			return Err(GenError::InvalidSeed("custom seed cannot be empty".to_owned()));
		}
		StartSeed::Custom(s) => s.clone(),
	};
	debug!("generating {length} characters from seed {start:?} at order {order}");

	let mut result: Vec<char> = start.chars().collect();
	result.reserve(length);

	let mut gram = String::new();
	for _ in 0..length {
		gram.clear();
		gram.extend(&result[result.len().saturating_sub(order)..]);

		let next = model
			.continuations(&gram)
			.and_then(|set| set.predict(rng))
			.ok_or_else(|| GenError::LookupMiss { gram: gram.clone() })?;
		result.push(next);
	}

	Ok(result.into_iter().collect())
}
