use std::collections::HashMap;

use crate::import::decode::STANDARD_DECODERS;
use crate::import::{ChunkReader, ImportError, ImportState, Result};

/// Signature shared by every decoder unit.
pub type DecodeFn = fn(&mut ChunkReader<'_>, &mut ImportState) -> Result<()>;

/// Decoder for one exact chunk id and version.
#[derive(Debug, Clone, Copy)]
pub struct DecoderUnit {
	/// Chunk identifier.
	pub chunk_id: u32,
	/// Payload layout version.
	pub version: u32,
	/// Human-readable label used in diagnostics.
	pub name: &'static str,
	/// Payload decoder.
	pub decode: DecodeFn,
}

impl DecoderUnit {
	/// Describe a decoder unit.
	pub const fn new(chunk_id: u32, version: u32, name: &'static str, decode: DecodeFn) -> Self {
		Self {
			chunk_id,
			version,
			name,
			decode,
		}
	}
}

/// Immutable map from `(chunk id, version)` to decoder unit.
#[derive(Debug, Clone)]
pub struct Registry {
	units: HashMap<(u32, u32), DecoderUnit>,
}

impl Registry {
	/// Index `units`, rejecting any repeated `(chunk id, version)` pair.
	pub fn build(units: &[DecoderUnit]) -> Result<Self> {
		let mut map = HashMap::with_capacity(units.len());
		for unit in units {
			if map.insert((unit.chunk_id, unit.version), *unit).is_some() {
				return Err(ImportError::DuplicateDecoder {
					chunk_id: unit.chunk_id,
					version: unit.version,
				});
			}
		}
		Ok(Self { units: map })
	}

	/// Registry with every built-in decoder unit.
	pub fn standard() -> Result<Self> {
		Self::build(STANDARD_DECODERS)
	}

	/// Decoder for an exact chunk id and version.
	pub fn lookup(&self, chunk_id: u32, version: u32) -> Option<&DecoderUnit> {
		self.units.get(&(chunk_id, version))
	}

	/// Registered versions of `chunk_id`, ascending.
	pub fn versions(&self, chunk_id: u32) -> Vec<u32> {
		let mut versions: Vec<u32> = self.units.keys().filter(|(id, _)| *id == chunk_id).map(|(_, version)| *version).collect();
		versions.sort_unstable();
		versions
	}

	/// Every unit ordered by chunk id, then version.
	pub fn units(&self) -> Vec<&DecoderUnit> {
		let mut units: Vec<&DecoderUnit> = self.units.values().collect();
		units.sort_by_key(|unit| (unit.chunk_id, unit.version));
		units
	}

	/// Number of registered units.
	pub fn len(&self) -> usize {
		self.units.len()
	}

	/// Whether no unit is registered.
	pub fn is_empty(&self) -> bool {
		self.units.is_empty()
	}
}
