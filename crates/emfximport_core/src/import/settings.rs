use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::import::asset::LayerType;
use crate::import::ids::{self, actor};
use crate::import::{FileKind, ImportError, Result};

/// Actor import options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorSettings {
	/// Load render meshes.
	pub load_meshes: bool,
	/// Load collision meshes.
	pub load_collision_meshes: bool,
	/// Load texture layers of standard materials.
	pub load_standard_material_layers: bool,
	/// Load skinning influences. Requires meshes.
	pub load_skinning_info: bool,
	/// Load node limits.
	pub load_limits: bool,
	/// Load embedded geometry levels of detail. Requires meshes.
	pub load_geometry_lods: bool,
	/// Load progressive morph targets.
	pub load_morph_targets: bool,
	/// Keep tangent and bitangent vertex layers.
	pub load_tangents: bool,
	/// Chunk ids skipped regardless of other options.
	pub chunk_ids_to_ignore: BTreeSet<u32>,
	/// Vertex layer types skipped while decoding meshes.
	pub layer_ids_to_ignore: BTreeSet<u32>,
}

impl Default for ActorSettings {
	fn default() -> Self {
		Self {
			load_meshes: true,
			load_collision_meshes: true,
			load_standard_material_layers: true,
			load_skinning_info: true,
			load_limits: true,
			load_geometry_lods: true,
			load_morph_targets: true,
			load_tangents: true,
			chunk_ids_to_ignore: BTreeSet::new(),
			layer_ids_to_ignore: BTreeSet::new(),
		}
	}
}

impl ActorSettings {
	/// Resolve contradictory toggles; applying it twice changes nothing.
	pub fn normalize(&mut self) {
		if !self.load_meshes {
			self.load_skinning_info = false;
			self.load_geometry_lods = false;
		}

		let tangent_layers = [LayerType::Tangents.id(), LayerType::Bitangents.id()];
		if self.load_meshes && !self.load_tangents {
			self.layer_ids_to_ignore.extend(tangent_layers);
		}
		if self.load_meshes && self.load_tangents && self.layer_ids_to_ignore.contains(&LayerType::Tangents.id()) {
			self.load_tangents = false;
		}

		for required in [LayerType::Positions, LayerType::Normals, LayerType::OriginalVertexNumbers] {
			self.layer_ids_to_ignore.remove(&required.id());
		}
	}

	/// Whether a chunk with `chunk_id` is skipped without decoding.
	pub fn skips_chunk(&self, chunk_id: u32) -> bool {
		if self.chunk_ids_to_ignore.contains(&chunk_id) {
			return true;
		}

		match chunk_id {
			actor::SKINNING_INFO => !self.load_skinning_info,
			actor::STD_MATERIAL_LAYER => !self.load_standard_material_layers,
			actor::LIMIT => !self.load_limits,
			actor::STD_PROG_MORPH_TARGETS => !self.load_morph_targets,
			actor::MESH_LOD_LEVELS => !self.load_geometry_lods,
			actor::MESH => !self.load_meshes && !self.load_collision_meshes,
			_ => false,
		}
	}

	/// Whether vertex layers of `layer_type` are kept.
	pub fn loads_layer(&self, layer_type: u32) -> bool {
		!self.layer_ids_to_ignore.contains(&layer_type)
	}
}

/// Skeletal motion import options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletalMotionSettings {
	/// Load the motion event table.
	pub load_motion_events: bool,
	/// Chunk ids skipped regardless of other options.
	pub chunk_ids_to_ignore: BTreeSet<u32>,
}

impl Default for SkeletalMotionSettings {
	fn default() -> Self {
		Self {
			load_motion_events: true,
			chunk_ids_to_ignore: BTreeSet::new(),
		}
	}
}

impl SkeletalMotionSettings {
	/// Whether a chunk with `chunk_id` is skipped without decoding.
	pub fn skips_chunk(&self, chunk_id: u32) -> bool {
		self.chunk_ids_to_ignore.contains(&chunk_id) || (chunk_id == ids::MOTION_EVENT_TABLE && !self.load_motion_events)
	}
}

/// Motion set import options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSetSettings {
	/// Mark the loaded set as owned by the runtime rather than the caller.
	pub owned_by_runtime: bool,
	/// Chunk ids skipped regardless of other options.
	pub chunk_ids_to_ignore: BTreeSet<u32>,
}

/// Node map import options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeMapSettings {
	/// Load the name pairs, not just the map header.
	pub load_nodes: bool,
	/// Chunk ids skipped regardless of other options.
	pub chunk_ids_to_ignore: BTreeSet<u32>,
}

impl Default for NodeMapSettings {
	fn default() -> Self {
		Self {
			load_nodes: true,
			chunk_ids_to_ignore: BTreeSet::new(),
		}
	}
}

/// Anim graph import options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimGraphSettings {
	/// Chunk ids skipped regardless of other options.
	pub chunk_ids_to_ignore: BTreeSet<u32>,
}

/// Settings of the import in progress, one case per destination kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSettings {
	/// Actor import.
	Actor(ActorSettings),
	/// Skeletal motion import.
	SkeletalMotion(SkeletalMotionSettings),
	/// Motion set import.
	MotionSet(MotionSetSettings),
	/// Node map import.
	NodeMap(NodeMapSettings),
	/// Anim graph import.
	AnimGraph(AnimGraphSettings),
}

impl ImportSettings {
	/// Destination kind these settings apply to.
	pub fn kind(&self) -> FileKind {
		match self {
			Self::Actor(_) => FileKind::Actor,
			Self::SkeletalMotion(_) => FileKind::SkeletalMotion,
			Self::MotionSet(_) => FileKind::MotionSet,
			Self::NodeMap(_) => FileKind::NodeMap,
			Self::AnimGraph(_) => FileKind::AnimGraph,
		}
	}

	/// Apply the per-kind normalization rules.
	pub fn normalize(&mut self) {
		if let Self::Actor(settings) = self {
			settings.normalize();
		}
	}

	/// Whether the dispatch loop skips `chunk_id` without invoking its decoder.
	pub fn skips_chunk(&self, chunk_id: u32) -> bool {
		match self {
			Self::Actor(settings) => settings.skips_chunk(chunk_id),
			Self::SkeletalMotion(settings) => settings.skips_chunk(chunk_id),
			Self::MotionSet(settings) => settings.chunk_ids_to_ignore.contains(&chunk_id),
			Self::NodeMap(settings) => settings.chunk_ids_to_ignore.contains(&chunk_id),
			Self::AnimGraph(settings) => settings.chunk_ids_to_ignore.contains(&chunk_id),
		}
	}

	/// Actor settings, failing for any other import kind.
	pub fn actor(&self, chunk_id: u32) -> Result<&ActorSettings> {
		match self {
			Self::Actor(settings) => Ok(settings),
			other => Err(ImportError::ChunkOutsideTarget { chunk_id, kind: other.kind() }),
		}
	}

	/// Node map settings, failing for any other import kind.
	pub fn node_map(&self, chunk_id: u32) -> Result<&NodeMapSettings> {
		match self {
			Self::NodeMap(settings) => Ok(settings),
			other => Err(ImportError::ChunkOutsideTarget { chunk_id, kind: other.kind() }),
		}
	}
}

#[cfg(test)]
mod tests;
