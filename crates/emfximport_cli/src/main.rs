#![allow(missing_docs)]

use clap::{ArgAction, Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "emfximport", about = "EMotion FX chunked asset inspection tools")]
struct Cli {
	/// Raise log verbosity (-v info, -vv debug, -vvv trace).
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print file kind, header fields and chunk statistics.
	Info(cmd::info::Args),
	/// List every chunk header.
	Chunks(cmd::chunks::Args),
	/// List the registered (chunk id, version) decoders.
	Decoders(cmd::decoders::Args),
	/// Decode a file and summarize or dump the result.
	Load(cmd::load::Args),
}

fn main() {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
		.format_timestamp(None)
		.init();
}

fn run(command: Commands) -> emfximport::import::Result<()> {
	match command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Chunks(args) => cmd::chunks::run(args),
		Commands::Decoders(args) => cmd::decoders::run(args),
		Commands::Load(args) => cmd::load::run(args),
	}
}
