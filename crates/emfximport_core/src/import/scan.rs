use std::collections::BTreeMap;

use serde::Serialize;

use crate::import::{ByteSource, ChunkHeader, Endian, FileHeader, FileKind, GraphInfo, ImportError, Registry, Result, SliceSource, classify};

/// One chunk header seen by [`ChunkScan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScannedChunk {
	/// Absolute offset of the chunk header.
	pub offset: u64,
	/// Parsed chunk header.
	#[serde(flatten)]
	pub header: ChunkHeader,
	/// Name of the registered decoder, if any.
	pub decoder: Option<&'static str>,
}

/// Iterator over the chunk headers of an in-memory asset file.
pub struct ChunkScan<'a> {
	source: SliceSource<'a>,
	endian: Endian,
	registry: &'a Registry,
	done: bool,
}

impl<'a> ChunkScan<'a> {
	/// Scan chunks starting at `offset`.
	pub fn new(bytes: &'a [u8], offset: u64, endian: Endian, registry: &'a Registry) -> Result<Self> {
		let mut source = SliceSource::new(bytes);
		source.seek(offset)?;
		Ok(Self {
			source,
			endian,
			registry,
			done: false,
		})
	}

	/// Sniff and parse the file header, then scan from the first chunk.
	pub fn open(bytes: &'a [u8], registry: &'a Registry) -> Result<(FileHeader, Self)> {
		let mut source = SliceSource::new(bytes);
		let kind = classify(&mut source)?;
		let header = FileHeader::read(&mut source, kind)?;
		if kind == FileKind::AnimGraph {
			GraphInfo::read(&mut source, header.endian)?;
		}
		let scan = Self::new(bytes, source.position(), header.endian, registry)?;
		Ok((header, scan))
	}

	/// Bytes after the last complete chunk, once the scan has ended.
	pub fn trailing_bytes(&self) -> u64 {
		self.source.remaining()
	}
}

impl Iterator for ChunkScan<'_> {
	type Item = Result<ScannedChunk>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done || self.source.is_eof() {
			self.done = true;
			return None;
		}

		let offset = self.source.position();
		let header = match ChunkHeader::read(&mut self.source, self.endian) {
			Ok(Some(header)) => header,
			Ok(None) => {
				self.done = true;
				if let Err(err) = self.source.seek(offset) {
					return Some(Err(err));
				}
				return None;
			}
			Err(err) => {
				self.done = true;
				return Some(Err(err));
			}
		};

		let rem = self.source.remaining();
		if u64::from(header.size) > rem {
			self.done = true;
			return Some(Err(ImportError::ChunkOutOfRange {
				at: offset,
				chunk_id: header.chunk_id,
				size: header.size,
				rem,
			}));
		}

		if let Err(err) = self.source.forward(u64::from(header.size)) {
			self.done = true;
			return Some(Err(err));
		}

		let decoder = self.registry.lookup(header.chunk_id, header.version).map(|unit| unit.name);
		Some(Ok(ScannedChunk { offset, header, decoder }))
	}
}

/// Chunk distribution of one asset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkStats {
	/// Parsed file header.
	pub header: FileHeader,
	/// Total chunks.
	pub chunk_count: usize,
	/// Chunks with no registered decoder for their version.
	pub unknown_count: usize,
	/// Chunk count per chunk id.
	pub counts: BTreeMap<u32, usize>,
	/// Bytes after the last chunk that do not form a header.
	pub trailing_bytes: u64,
}

/// Scan basic chunk distribution statistics.
pub fn scan_chunk_stats(bytes: &[u8], registry: &Registry) -> Result<ChunkStats> {
	let (header, mut scan) = ChunkScan::open(bytes, registry)?;
	let mut stats = ChunkStats {
		header,
		chunk_count: 0,
		unknown_count: 0,
		counts: BTreeMap::new(),
		trailing_bytes: 0,
	};

	for chunk in scan.by_ref() {
		let chunk = chunk?;
		stats.chunk_count += 1;
		if chunk.decoder.is_none() {
			stats.unknown_count += 1;
		}
		*stats.counts.entry(chunk.header.chunk_id).or_insert(0) += 1;
	}
	stats.trailing_bytes = scan.trailing_bytes();

	Ok(stats)
}

#[cfg(test)]
mod tests;
