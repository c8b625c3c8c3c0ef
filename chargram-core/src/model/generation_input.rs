use super::generator::Generator;
use super::ngram_model::NGramModel;
use crate::error::{GenError, Result};

/// Default number of characters generated after the seed.
pub const DEFAULT_LENGTH: usize = 250;

/// Strategy used to select the starting gram of a generation.
///
/// # Variants
/// - `Random`: a gram of the model, every distinct gram equally likely.
/// - `Custom(String)`: the provided text; its trailing characters must be a
///   gram of the model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StartSeed {
	#[default]
	Random,
	Custom(String),
}

impl StartSeed {
	/// `None` or an empty string maps to `Random`.
	pub fn from_option(seed: Option<String>) -> Self {
		match seed {
			Some(s) if !s.is_empty() => StartSeed::Custom(s),
			_ => StartSeed::Random,
		}
	}
}

/// Parameters of a generation run.
///
/// # Responsibilities
/// - Track the output length, the seed strategy and the random seed
/// - Check a caller-supplied order against the model before running
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationInput {
	/// Number of characters generated after the seed.
	pub length: usize,

	/// How the starting gram is chosen.
	pub start_seed: StartSeed,

	/// Seed of the random source, `None` for entropy.
	pub rng_seed: Option<u64>,

	/// Order expected by the caller, checked against the model.
	order: Option<usize>,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			length: DEFAULT_LENGTH,
			start_seed: StartSeed::Random,
			rng_seed: None,
			order: None,
		}
	}
}

impl GenerationInput {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the expected order.
	///
	/// # Errors
	/// Returns `GenError::InvalidOrder` if `order == 0`.
	pub fn set_order(&mut self, order: usize) -> Result<()> {
		if order == 0 {
			return Err(GenError::InvalidOrder(order));
		}
		self.order = Some(order);
		Ok(())
	}

	/// Generates text from `model` with these parameters.
	///
	/// # Errors
	/// - `GenError::OrderMismatch` if an expected order was set and differs
	///   from the model's order
	/// - any error of [`Generator::generate`]
	pub fn run(&self, model: &NGramModel) -> Result<String> {
		if let Some(order) = self.order {
			if order != model.order() {
				return Err(GenError::OrderMismatch { expected: model.order(), found: order });
			}
		}
		Generator::new(model, self.rng_seed).generate(self.length, &self.start_seed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let input = GenerationInput::new();
		assert_eq!(input.length, DEFAULT_LENGTH);
		assert_eq!(input.start_seed, StartSeed::Random);
		assert_eq!(input.order, None);
	}

	#[test]
	fn zero_order_is_rejected() {
		let mut input = GenerationInput::new();
		assert!(matches!(input.set_order(0), Err(GenError::InvalidOrder(0))));
		assert_eq!(input.order, None);
	}

	#[test]
	fn mismatched_order_is_reported() {
		let model = NGramModel::build("abcabcabc", 3).unwrap();
		let mut input = GenerationInput::new();
		input.set_order(4).unwrap();
		match input.run(&model) {
			Err(GenError::OrderMismatch { expected, found }) => {
				assert_eq!(expected, 3);
				assert_eq!(found, 4);
			}
			other => panic!("unexpected result {other:?}"),
		}
	}

	#[test]
	fn run_uses_length_and_seed() {
		let model = NGramModel::build("abcabcabc", 3).unwrap();
		let mut input = GenerationInput::new();
		input.set_order(3).unwrap();
		input.length = 4;
		input.rng_seed = Some(11);
		input.start_seed = StartSeed::Custom("abc".to_owned());
		assert_eq!(input.run(&model).unwrap(), "abcabca");
	}

	#[test]
	fn empty_seed_option_is_random() {
		assert_eq!(StartSeed::from_option(None), StartSeed::Random);
		assert_eq!(StartSeed::from_option(Some(String::new())), StartSeed::Random);
		assert_eq!(StartSeed::from_option(Some("ab".into())), StartSeed::Custom("ab".into()));
	}
}
