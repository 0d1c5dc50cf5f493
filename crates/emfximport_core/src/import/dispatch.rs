use log::{debug, trace, warn};

use crate::import::asset::{Actor, AnimGraph, MotionSetTree, NodeMap, SkeletalMotion};
use crate::import::{ByteSource, ChunkHeader, ChunkReader, Endian, FileKind, ImportError, ImportSettings, Registry, Result, SharedData};

/// Destination object being populated by one import.
#[derive(Debug)]
pub enum Target {
	/// Actor under construction.
	Actor(Actor),
	/// Skeletal motion under construction.
	SkeletalMotion(SkeletalMotion),
	/// Motion set tree; the sets themselves accumulate in the shared context.
	MotionSet(MotionSetTree),
	/// Node map under construction.
	NodeMap(NodeMap),
	/// Anim graph under construction.
	AnimGraph(AnimGraph),
}

macro_rules! target_accessor {
	($name:ident, $variant:ident, $ty:ty) => {
		#[doc = concat!("Mutable access to the [`", stringify!($ty), "`], failing for any other destination.")]
		pub fn $name(&mut self, chunk_id: u32) -> Result<&mut $ty> {
			let kind = self.kind();
			match self {
				Self::$variant(value) => Ok(value),
				_ => Err(ImportError::ChunkOutsideTarget { chunk_id, kind }),
			}
		}
	};
}

impl Target {
	/// Kind of destination.
	pub fn kind(&self) -> FileKind {
		match self {
			Self::Actor(_) => FileKind::Actor,
			Self::SkeletalMotion(_) => FileKind::SkeletalMotion,
			Self::MotionSet(_) => FileKind::MotionSet,
			Self::NodeMap(_) => FileKind::NodeMap,
			Self::AnimGraph(_) => FileKind::AnimGraph,
		}
	}

	target_accessor!(actor_mut, Actor, Actor);
	target_accessor!(motion_mut, SkeletalMotion, SkeletalMotion);
	target_accessor!(motion_set_mut, MotionSet, MotionSetTree);
	target_accessor!(node_map_mut, NodeMap, NodeMap);
	target_accessor!(anim_graph_mut, AnimGraph, AnimGraph);
}

/// Everything one import threads through its decoders.
pub struct ImportState {
	/// Byte order declared by the file header.
	pub endian: Endian,
	/// Normalized private copy of the caller's settings.
	pub settings: ImportSettings,
	/// Destination object.
	pub target: Target,
	/// Per-import shared context, released when the state drops.
	pub shared: SharedData,
}

impl ImportState {
	/// Create the state for one import with a freshly bootstrapped shared context.
	pub fn new(endian: Endian, settings: ImportSettings, target: Target) -> Self {
		Self {
			endian,
			settings,
			target,
			shared: SharedData::bootstrap(),
		}
	}
}

/// Process one chunk at the current offset.
///
/// Returns `Ok(false)` once the stream is exhausted or too short for another chunk
/// header; trailing bytes shorter than a header are tolerated as end of input.
/// Unknown and settings-skipped chunks are forwarded over by their declared size.
/// Decoded chunks are consumed in full by their decoder.
pub fn process_next_chunk(registry: &Registry, source: &mut dyn ByteSource, state: &mut ImportState) -> Result<bool> {
	if source.is_eof() {
		return Ok(false);
	}

	let at = source.position();
	let Some(header) = ChunkHeader::read(source, state.endian)? else {
		debug!("{} trailing bytes at offset {at} are shorter than a chunk header", source.length() - at);
		return Ok(false);
	};

	let Some(unit) = registry.lookup(header.chunk_id, header.version) else {
		warn!(
			"unknown chunk (id={} size={} bytes version={}), skipping",
			header.chunk_id, header.size, header.version
		);
		source.forward(u64::from(header.size))?;
		return Ok(true);
	};

	if state.settings.skips_chunk(header.chunk_id) {
		debug!("skipping {} chunk (id={} size={}) per import settings", unit.name, header.chunk_id, header.size);
		source.forward(u64::from(header.size))?;
		return Ok(true);
	}

	trace!("decoding {} chunk v{} at offset {at} ({} bytes)", unit.name, header.version, header.size);
	let mut reader = ChunkReader::new(source, state.endian, header);
	(unit.decode)(&mut reader, state)?;
	Ok(true)
}

/// Run [`process_next_chunk`] until it reports the end of the stream.
///
/// Returns the number of chunks processed.
pub fn dispatch_all(registry: &Registry, source: &mut dyn ByteSource, state: &mut ImportState) -> Result<usize> {
	let mut processed = 0;
	while process_next_chunk(registry, source, state)? {
		processed += 1;
	}
	Ok(processed)
}

#[cfg(test)]
mod tests;
