#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "sexpr", about = "Schema-directed S-expression decoding tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the token stream of a document.
	Tokens {
		/// Input file, or `-` for stdin.
		path: PathBuf,
		#[arg(long)]
		json: bool,
	},
	/// Decode a document against a type name and print the value.
	Decode {
		/// Input file, or `-` for stdin.
		path: PathBuf,
		/// Destination type name, e.g. `map[string][]int`.
		#[arg(long = "type")]
		type_name: String,
		#[arg(long)]
		json: bool,
		/// Lenient arrays, top-level aliases, trailing input allowed.
		#[arg(long)]
		compat: bool,
	},
	/// Decode a document, then print it re-encoded in canonical form.
	Fmt {
		/// Input file, or `-` for stdin.
		path: PathBuf,
		/// Destination type name, e.g. `map[string][]int`.
		#[arg(long = "type")]
		type_name: String,
		/// Lenient arrays, top-level aliases, trailing input allowed.
		#[arg(long)]
		compat: bool,
	},
}

fn main() {
	init_tracing();
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sexpr=warn"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run() -> sexpr::codec::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Tokens { path, json } => cmd::tokens::run(path, json),
		Commands::Decode {
			path,
			type_name,
			json,
			compat,
		} => cmd::decode::run(path, &type_name, json, compat),
		Commands::Fmt { path, type_name, compat } => cmd::fmt::run(path, &type_name, compat),
	}
}
