use std::fs;
use std::path::PathBuf;

use emfximport::import::{ChunkScan, FileHeader, Result, ScannedChunk};

use crate::cmd::util::{chunk_label, emit_json, importer};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub limit: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

#[derive(serde::Serialize)]
struct ChunksJson {
	path: String,
	header: FileHeader,
	chunks: Vec<ScannedChunk>,
	trailing_bytes: u64,
}

/// List chunk headers in file order without decoding payloads.
pub fn run(args: Args) -> Result<()> {
	let Args { path, limit, json } = args;

	let importer = importer()?;
	let bytes = fs::read(&path)?;
	let (header, mut scan) = ChunkScan::open(&bytes, importer.registry())?;

	let mut chunks = Vec::new();
	for chunk in scan.by_ref() {
		chunks.push(chunk?);
	}
	let trailing_bytes = scan.trailing_bytes();
	if let Some(limit) = limit {
		chunks.truncate(limit);
	}

	if json {
		return emit_json(&ChunksJson {
			path: path.display().to_string(),
			header,
			chunks,
			trailing_bytes,
		});
	}

	println!("path: {}", path.display());
	println!("kind: {}", header.kind);
	println!("offset\tid\tversion\tsize\tdecoder");
	for chunk in &chunks {
		println!(
			"{}\t{}\t{}\t{}\t{}",
			chunk.offset,
			chunk.header.chunk_id,
			chunk.header.version,
			chunk.header.size,
			chunk_label(chunk.decoder)
		);
	}
	if trailing_bytes > 0 {
		println!("trailing_bytes: {trailing_bytes}");
	}

	Ok(())
}
