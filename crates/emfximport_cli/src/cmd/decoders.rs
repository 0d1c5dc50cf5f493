use emfximport::import::Result;

use crate::cmd::util::{emit_json, importer};

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub json: bool,
}

#[derive(serde::Serialize)]
struct DecoderJson {
	chunk_id: u32,
	version: u32,
	name: &'static str,
}

/// Print the supported (chunk id, version) matrix.
pub fn run(args: Args) -> Result<()> {
	let importer = importer()?;
	let units = importer.registry().units();

	if args.json {
		let rows: Vec<DecoderJson> = units
			.iter()
			.map(|unit| DecoderJson {
				chunk_id: unit.chunk_id,
				version: unit.version,
				name: unit.name,
			})
			.collect();
		return emit_json(&rows);
	}

	println!("id\tversion\tname");
	for unit in units {
		println!("{}\t{}\t{}", unit.chunk_id, unit.version, unit.name);
	}
	Ok(())
}
