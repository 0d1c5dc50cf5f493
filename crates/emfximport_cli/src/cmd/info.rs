use std::fs;
use std::path::PathBuf;

use emfximport::import::{ChunkStats, Result, scan_chunk_stats};

use crate::cmd::util::{chunk_label, emit_json, importer};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	#[serde(flatten)]
	stats: ChunkStats,
}

/// Print header fields and chunk distribution.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let importer = importer()?;
	let bytes = fs::read(&path)?;
	let stats = scan_chunk_stats(&bytes, importer.registry())?;

	if json {
		return emit_json(&InfoJson {
			path: path.display().to_string(),
			stats,
		});
	}

	let header = stats.header;
	println!("path: {}", path.display());
	println!("kind: {}", header.kind);
	println!("endian: {}", header.endian.as_str());
	println!("version: {}.{}", header.hi_version, header.lo_version);
	if let Some(mul_order) = header.mul_order {
		println!("mul_order: {mul_order}");
	}
	if let Some(counts) = header.graph {
		println!("graph_file_version: {}", counts.file_version);
		println!("graph_nodes: {}", counts.num_nodes);
		println!("graph_parameters: {}", counts.num_parameters);
	}
	println!("chunk_count: {}", stats.chunk_count);
	println!("unknown_chunks: {}", stats.unknown_count);
	println!("trailing_bytes: {}", stats.trailing_bytes);

	let mut entries: Vec<_> = stats.counts.into_iter().collect();
	entries.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));

	println!("top_chunks:");
	for (chunk_id, count) in entries.into_iter().take(12) {
		let versions = importer.registry().versions(chunk_id);
		let name = versions.first().and_then(|version| importer.registry().lookup(chunk_id, *version)).map(|unit| unit.name);
		println!("  {chunk_id} ({}, versions {versions:?}): {count}", chunk_label(name));
	}

	Ok(())
}
