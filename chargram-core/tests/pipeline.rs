use std::collections::HashSet;

use chargram_core::model::select::make_rng;
use chargram_core::{codec, generate, io, GenError, GenerationInput, Generator, NGramModel, StartSeed};
use tempfile::tempdir;

const CORPUS: &str = "A Markov chain or Markov process is a stochastic model describing a sequence of \
	possible events in which the probability of each event depends only on the state attained in the \
	previous event. It is a stochastic process with a series of states that alternate between one \
	another. A Markov chain";

#[test]
fn build_save_load_generate() {
	let dir = tempdir().unwrap();
	let text_path = dir.path().join("corpus.txt");
	let model_path = dir.path().join("corpus.cgrm");
	let out_path = dir.path().join("out.txt");

	io::write_text(&text_path, CORPUS).unwrap();
	let model = NGramModel::build(&io::read_text(&text_path).unwrap(), 4).unwrap();
	io::save_model(&model_path, &model).unwrap();

	let loaded = io::load_model_with_order(&model_path, 4).unwrap();
	assert_eq!(loaded, model);

	let mut input = GenerationInput::new();
	input.set_order(4).unwrap();
	input.length = 120;
	input.rng_seed = Some(99);
	let text = input.run(&loaded).unwrap();
	assert_eq!(text.chars().count(), 4 + 120);

	io::write_text(&out_path, &text).unwrap();
	assert_eq!(io::read_text(&out_path).unwrap(), text);
}

#[test]
fn generated_characters_come_from_the_model() {
	let model = NGramModel::build(CORPUS, 3).unwrap();
	let seen: HashSet<char> = model.grams().flat_map(|(_, set)| set.as_slice().iter().copied()).collect();

	let mut rng = make_rng(Some(2024));
	let text = generate(&model, 3, 300, &StartSeed::Random, &mut rng).unwrap();
	assert_eq!(text.chars().count(), 303);
	assert!(text.chars().skip(3).all(|c| seen.contains(&c)));

	// Every step must follow an observed transition.
	let chars: Vec<char> = text.chars().collect();
	for window in chars.windows(4) {
		let gram: String = window[..3].iter().collect();
		assert!(model.continuations(&gram).unwrap().contains(window[3]));
	}
}

#[test]
fn decoded_model_generates_like_the_built_one() {
	let model = NGramModel::build(CORPUS, 5).unwrap();
	let decoded = codec::decode(&codec::encode(&model)).unwrap();

	let a = Generator::new(&model, Some(5)).generate(150, &StartSeed::Random).unwrap();
	let b = Generator::new(&decoded, Some(5)).generate(150, &StartSeed::Random).unwrap();
	assert_eq!(a, b);
}

#[test]
fn mismatched_order_never_produces_text() {
	let model = NGramModel::build("abcabcabc", 3).unwrap();
	let mut rng = make_rng(Some(0));
	let err = generate(&model, 4, 10, &StartSeed::Random, &mut rng).unwrap_err();
	assert!(matches!(err, GenError::LookupMiss { .. }));
}

#[test]
fn short_text_yields_empty_model_and_no_generation() {
	let model = NGramModel::build("hi", 3).unwrap();
	assert!(model.is_empty());
	let err = GenerationInput::new().run(&model).unwrap_err();
	assert!(matches!(err, GenError::EmptyModel));
}
