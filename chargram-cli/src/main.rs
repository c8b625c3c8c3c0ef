//! Command-line front end: train a character n-gram model, then sample text from it.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::{error, info};

use chargram_core::model::generation_input::DEFAULT_LENGTH;
use chargram_core::{io, GenError, GenerationInput, NGramModel, StartSeed};

#[derive(Parser, Debug)]
#[command(name = "chargram", version)]
#[command(about = "Character n-gram text generator")]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Build a model from a text file and save it
	New {
		/// Training text
		input: PathBuf,
		/// Gram length in characters
		order: usize,
		/// Where to write the model
		output: PathBuf,
	},
	/// Generate text from a saved model and print it
	Gen {
		/// Saved model
		model: PathBuf,
		/// Gram length the model was built with
		order: usize,
		#[command(flatten)]
		options: GenOptions,
	},
	/// Generate text from a saved model and write it to a file
	Save {
		/// Saved model
		model: PathBuf,
		/// Gram length the model was built with
		order: usize,
		/// Where to write the generated text
		output: PathBuf,
		#[command(flatten)]
		options: GenOptions,
	},
}

#[derive(Args, Debug)]
struct GenOptions {
	/// Number of characters generated after the seed
	#[arg(short, long, default_value_t = DEFAULT_LENGTH)]
	length: usize,

	/// Text to start from instead of a random gram
	#[arg(short, long)]
	seed: Option<String>,

	/// Seed of the random source, for reproducible output
	#[arg(short, long)]
	rng_seed: Option<u64>,
}

impl GenOptions {
	fn to_input(&self, order: usize) -> Result<GenerationInput, GenError> {
		let mut input = GenerationInput::new();
		input.set_order(order)?;
		input.length = self.length;
		input.start_seed = StartSeed::from_option(self.seed.clone());
		input.rng_seed = self.rng_seed;
		Ok(input)
	}
}

/// Process exit status for each kind of failure.
fn exit_code(err: &GenError) -> u8 {
	match err {
		GenError::InvalidOrder(_) | GenError::OrderMismatch { .. } | GenError::InvalidSeed(_) => 2,
		GenError::Io { .. } => 3,
		GenError::Format(_) => 4,
		GenError::LookupMiss { .. } => 5,
		GenError::EmptyModel => 6,
	}
}

fn build(input: &Path, order: usize, output: &Path) -> Result<(), GenError> {
	info!("reading {}", input.display());
	let text = io::read_text(input)?;
	info!("building order {order} model from {} characters", text.chars().count());
	let model = NGramModel::build(&text, order)?;
	io::save_model(output, &model)?;
	info!("model written to {}", output.display());
	Ok(())
}

fn sample(model: &Path, order: usize, options: &GenOptions) -> Result<String, GenError> {
	let input = options.to_input(order)?;
	let model = io::load_model_with_order(model, order)?;
	input.run(&model)
}

fn run(cli: Cli) -> Result<(), GenError> {
	match cli.command {
		Command::New { input, order, output } => build(&input, order, &output),
		Command::Gen { model, order, options } => {
			println!("{}", sample(&model, order, &options)?);
			Ok(())
		}
		Command::Save { model, order, output, options } => {
			let text = sample(&model, order, &options)?;
			io::write_text(&output, &text)?;
			info!("{} characters written to {}", text.chars().count(), output.display());
			Ok(())
		}
	}
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let cli = Cli::parse();
	match run(cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!("{e}");
			ExitCode::from(exit_code(&e))
		}
	}
}
