use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};

use chargram_core::model::generation_input::DEFAULT_LENGTH;
use chargram_core::{io, GenError, Generator, NGramModel, StartSeed};

/// Upper bound on the `length` query parameter.
const MAX_LENGTH: usize = 100_000;

#[derive(Parser, Debug)]
#[command(name = "chargram-server", version)]
#[command(about = "Serve text generation from a saved character n-gram model")]
struct Args {
	/// Saved model to serve
	model: PathBuf,

	/// Address to bind
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	/// Port to bind
	#[arg(short, long, default_value_t = 5000)]
	port: u16,
}

/// Query parameters of the `/v1/generate` endpoint
#[derive(Deserialize, Debug, Default)]
struct GenerateParams {
	length: Option<usize>,
	seed: Option<String>,
	rng_seed: Option<u64>,
}

/// Body of the `/v1/model` endpoint
#[derive(Serialize, Debug)]
struct ModelInfo {
	name: Option<String>,
	order: usize,
	grams: usize,
}

/// Model shared by every worker, read-only once loaded.
struct SharedData {
	name: Option<String>,
	model: NGramModel,
}

impl GenerateParams {
	/// Output length, checked against `MAX_LENGTH`.
	fn length(&self) -> Result<usize, String> {
		match self.length {
			None => Ok(DEFAULT_LENGTH),
			Some(n) if n > MAX_LENGTH => Err(format!("length must be <= {MAX_LENGTH}")),
			Some(n) => Ok(n),
		}
	}
}

/// GET /v1/generate
///
/// Generates text from the loaded model. Errors caused by the query (bad seed,
/// custom seed not in the model) are reported as 400; a random walk reaching
/// a gram without successor is a 500.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let length = match query.length() {
		Ok(n) => n,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	let start_seed = StartSeed::from_option(query.seed.clone());

	match Generator::new(&data.model, query.rng_seed).generate(length, &start_seed) {
		Ok(text) => HttpResponse::Ok().body(text),
		Err(e @ GenError::InvalidSeed(_)) => HttpResponse::BadRequest().body(e.to_string()),
		Err(e @ GenError::LookupMiss { .. }) if matches!(start_seed, StartSeed::Custom(_)) => {
			HttpResponse::BadRequest().body(e.to_string())
		}
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// GET /v1/model
#[get("/v1/model")]
async fn get_model(data: web::Data<SharedData>) -> impl Responder {
	HttpResponse::Ok().json(ModelInfo {
		name: data.name.clone(),
		order: data.model.order(),
		grams: data.model.len(),
	})
}

/// Main entry point for the server.
///
/// Loads the model once and shares it, without lock, across all workers.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	let model = io::load_model(&args.model).map_err(std::io::Error::other)?;
	let shared_data = web::Data::new(SharedData {
		name: io::model_name(&args.model),
		model,
	});

	info!("listening on {}:{}", args.host, args.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET"]))
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_model)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}
