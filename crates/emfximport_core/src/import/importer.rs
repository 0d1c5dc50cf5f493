//! Loader entry points: one path, buffer and stream loader per destination kind.

use std::fs::{self, File};
use std::mem;
use std::path::Path;
use std::time::Instant;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::import::asset::{Actor, AnimGraph, MotionSetTree, NodeMap, SkeletalMotion};
use crate::import::header::peek_magic;
use crate::import::{
	ActorSettings, AnimGraphSettings, ByteSource, FileHeader, FileKind, GraphInfo, ImportError, ImportSettings, ImportState, MotionSetSettings,
	NodeMapSettings, ReaderSource, Registry, Result, SharedData, SkeletalMotionSettings, SliceSource, Target, classify, dispatch_all,
};

/// Settings for every destination kind, used when the kind is only known after sniffing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsBundle {
	/// Actor options.
	pub actor: ActorSettings,
	/// Skeletal motion options.
	pub skeletal_motion: SkeletalMotionSettings,
	/// Motion set options.
	pub motion_set: MotionSetSettings,
	/// Node map options.
	pub node_map: NodeMapSettings,
	/// Anim graph options.
	pub anim_graph: AnimGraphSettings,
}

impl SettingsBundle {
	/// Settings for a `kind` import, or `None` when the kind has no loader.
	pub fn for_kind(&self, kind: FileKind) -> Option<ImportSettings> {
		match kind {
			FileKind::Actor => Some(ImportSettings::Actor(self.actor.clone())),
			FileKind::SkeletalMotion | FileKind::WaveletSkeletalMotion => Some(ImportSettings::SkeletalMotion(self.skeletal_motion.clone())),
			FileKind::MotionSet => Some(ImportSettings::MotionSet(self.motion_set.clone())),
			FileKind::NodeMap => Some(ImportSettings::NodeMap(self.node_map.clone())),
			FileKind::AnimGraph => Some(ImportSettings::AnimGraph(self.anim_graph.clone())),
			FileKind::Unknown => None,
		}
	}
}

/// Fully imported object of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "asset", rename_all = "snake_case")]
pub enum Asset {
	/// Actor.
	Actor(Actor),
	/// Skeletal motion, keyframed or wavelet.
	SkeletalMotion(SkeletalMotion),
	/// Motion set tree.
	MotionSet(MotionSetTree),
	/// Node map.
	NodeMap(NodeMap),
	/// Anim graph.
	AnimGraph(AnimGraph),
}

impl Asset {
	/// Loader kind of this object.
	pub fn kind(&self) -> FileKind {
		match self {
			Self::Actor(_) => FileKind::Actor,
			Self::SkeletalMotion(_) => FileKind::SkeletalMotion,
			Self::MotionSet(_) => FileKind::MotionSet,
			Self::NodeMap(_) => FileKind::NodeMap,
			Self::AnimGraph(_) => FileKind::AnimGraph,
		}
	}

	fn set_file_name(&mut self, name: String) {
		let slot = match self {
			Self::Actor(actor) => &mut actor.file_name,
			Self::SkeletalMotion(motion) => &mut motion.file_name,
			Self::MotionSet(tree) => &mut tree.file_name,
			Self::NodeMap(map) => &mut map.file_name,
			Self::AnimGraph(graph) => &mut graph.file_name,
		};
		*slot = Some(name);
	}
}

/// Chunk-dispatch importer holding the immutable decoder registry.
///
/// Each load owns its state; one importer can serve concurrent loads.
#[derive(Debug, Clone)]
pub struct Importer {
	registry: Registry,
}

macro_rules! typed_loaders {
	($kind:literal, $load:ident, $load_bytes:ident, $load_file:ident, $settings:ident, $variant:ident, $ty:ty, $file_kind:expr) => {
		#[doc = concat!("Load ", $kind, " from `source`, positioned at its file header.")]
		pub fn $load(&self, source: &mut dyn ByteSource, settings: &$settings) -> Result<$ty> {
			let asset = self.load_as(source, ImportSettings::$variant(settings.clone()))?;
			Self::expect_kind(asset, $file_kind, |asset| match asset {
				Asset::$variant(value) => Some(value),
				_ => None,
			})
		}

		#[doc = concat!("Load ", $kind, " from an in-memory file.")]
		pub fn $load_bytes(&self, bytes: &[u8], settings: &$settings) -> Result<$ty> {
			self.$load(&mut SliceSource::new(bytes), settings)
		}

		#[doc = concat!("Load ", $kind, " from a file on disk, recording its path on the result.")]
		pub fn $load_file(&self, path: impl AsRef<Path>, settings: &$settings) -> Result<$ty> {
			let asset = self.load_path(path.as_ref(), ImportSettings::$variant(settings.clone()))?;
			Self::expect_kind(asset, $file_kind, |asset| match asset {
				Asset::$variant(value) => Some(value),
				_ => None,
			})
		}
	};
}

impl Importer {
	/// Importer with every built-in decoder registered.
	pub fn new() -> Result<Self> {
		Ok(Self::with_registry(Registry::standard()?))
	}

	/// Importer over a caller-built registry.
	pub fn with_registry(registry: Registry) -> Self {
		Self { registry }
	}

	/// Registered decoders.
	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	typed_loaders!("an actor", load_actor, load_actor_bytes, load_actor_file, ActorSettings, Actor, Actor, FileKind::Actor);
	typed_loaders!(
		"a skeletal motion",
		load_skeletal_motion,
		load_skeletal_motion_bytes,
		load_skeletal_motion_file,
		SkeletalMotionSettings,
		SkeletalMotion,
		SkeletalMotion,
		FileKind::SkeletalMotion
	);
	typed_loaders!(
		"a motion set",
		load_motion_set,
		load_motion_set_bytes,
		load_motion_set_file,
		MotionSetSettings,
		MotionSet,
		MotionSetTree,
		FileKind::MotionSet
	);
	typed_loaders!("a node map", load_node_map, load_node_map_bytes, load_node_map_file, NodeMapSettings, NodeMap, NodeMap, FileKind::NodeMap);
	typed_loaders!(
		"an anim graph",
		load_anim_graph,
		load_anim_graph_bytes,
		load_anim_graph_file,
		AnimGraphSettings,
		AnimGraph,
		AnimGraph,
		FileKind::AnimGraph
	);

	/// Sniff `source` and load it with the matching settings from `bundle`.
	pub fn load(&self, source: &mut dyn ByteSource, bundle: &SettingsBundle) -> Result<Asset> {
		let kind = classify(source)?;
		let Some(settings) = bundle.for_kind(kind) else {
			let mut magic = [0_u8; 4];
			source.read_exact(&mut magic)?;
			source.seek(0)?;
			return Err(ImportError::UnknownMagic { expected: kind, magic });
		};
		self.load_as(source, settings)
	}

	/// Sniff and load an in-memory file.
	pub fn load_bytes(&self, bytes: &[u8], bundle: &SettingsBundle) -> Result<Asset> {
		self.load(&mut SliceSource::new(bytes), bundle)
	}

	/// Sniff and load a file on disk.
	pub fn load_file(&self, path: impl AsRef<Path>, bundle: &SettingsBundle) -> Result<Asset> {
		let path = path.as_ref();
		let kind = self.check_file_type(path)?;
		let Some(settings) = bundle.for_kind(kind) else {
			return self.load_bytes(&fs::read(path)?, bundle);
		};
		self.load_path(path, settings)
	}

	/// Classify the file at `path` by its header.
	pub fn check_file_type(&self, path: impl AsRef<Path>) -> Result<FileKind> {
		let mut source = ReaderSource::new(File::open(path)?)?;
		classify(&mut source)
	}

	/// Classify `source` by its header and rewind it.
	pub fn check_stream_type(&self, source: &mut dyn ByteSource) -> Result<FileKind> {
		classify(source)
	}

	fn expect_kind<T>(asset: Asset, expected: FileKind, pick: impl FnOnce(Asset) -> Option<T>) -> Result<T> {
		let found = asset.kind();
		pick(asset).ok_or(ImportError::WrongFileKind { expected, found })
	}

	fn load_path(&self, path: &Path, settings: ImportSettings) -> Result<Asset> {
		let kind = settings.kind();
		let started = Instant::now();
		info!("loading {kind} from {}", path.display());

		let result = fs::read(path).map_err(ImportError::from).and_then(|bytes| self.load_as(&mut SliceSource::new(&bytes), settings));
		match result {
			Ok(mut asset) => {
				asset.set_file_name(path.display().to_string());
				info!("loaded {kind} from {} in {:.1} ms", path.display(), started.elapsed().as_secs_f64() * 1000.0);
				Ok(asset)
			}
			Err(err) => {
				error!("failed to load {kind} from {}: {err}", path.display());
				Err(err)
			}
		}
	}

	/// Run one import: verify the header, dispatch every chunk, then finalize.
	///
	/// The destination and the shared context are dropped on every failure path.
	fn load_as(&self, source: &mut dyn ByteSource, mut settings: ImportSettings) -> Result<Asset> {
		let expected = settings.kind();
		if matches!(expected, FileKind::MotionSet | FileKind::AnimGraph) && peek_magic(source)?.is_none() {
			return Err(ImportError::NotLegacyFormat { expected });
		}

		let header = FileHeader::read(source, expected)?;
		let requested = settings.clone();
		settings.normalize();
		if settings != requested {
			debug!("normalized {expected} settings: {settings:?}");
		}
		debug!("{} header: endian={} version={}.{}", header.kind, header.endian.as_str(), header.hi_version, header.lo_version);

		let target = start_target(&header, source)?;
		let mut state = ImportState::new(header.endian, settings, target);
		if let Some(counts) = header.graph {
			state.shared.graph_nodes()?.declared_nodes = counts.num_nodes;
		}

		let processed = dispatch_all(&self.registry, source, &mut state)?;
		debug!("processed {processed} chunks");

		let ImportState { settings, target, mut shared, .. } = state;
		finish_target(target, &settings, &mut shared)
	}
}

fn start_target(header: &FileHeader, source: &mut dyn ByteSource) -> Result<Target> {
	let target = match header.kind {
		FileKind::Actor => Target::Actor(Actor::default()),
		FileKind::SkeletalMotion | FileKind::WaveletSkeletalMotion => Target::SkeletalMotion(SkeletalMotion {
			is_wavelet: header.kind == FileKind::WaveletSkeletalMotion,
			..SkeletalMotion::default()
		}),
		FileKind::MotionSet => Target::MotionSet(MotionSetTree {
			file_name: None,
			owned_by_runtime: false,
			sets: Vec::new(),
		}),
		FileKind::NodeMap => Target::NodeMap(NodeMap::default()),
		FileKind::AnimGraph => {
			let info = GraphInfo::read(source, header.endian)?;
			Target::AnimGraph(AnimGraph {
				name: info.name.clone(),
				info,
				declared: header.graph.unwrap_or_default(),
				..AnimGraph::default()
			})
		}
		FileKind::Unknown => return Err(ImportError::NotLegacyFormat { expected: header.kind }),
	};
	Ok(target)
}

fn finish_target(target: Target, settings: &ImportSettings, shared: &mut SharedData) -> Result<Asset> {
	let asset = match target {
		Target::Actor(mut actor) => {
			actor.finish();
			Asset::Actor(actor)
		}
		Target::SkeletalMotion(mut motion) => {
			motion.finish();
			Asset::SkeletalMotion(motion)
		}
		Target::MotionSet(mut tree) => {
			tree.sets = mem::take(&mut shared.motion_sets()?.sets);
			if tree.sets.is_empty() {
				return Err(ImportError::MissingMotionSet);
			}
			if let ImportSettings::MotionSet(settings) = settings {
				tree.owned_by_runtime = settings.owned_by_runtime;
			}
			Asset::MotionSet(tree)
		}
		Target::NodeMap(map) => Asset::NodeMap(map),
		Target::AnimGraph(mut graph) => {
			let table = shared.graph_nodes()?;
			if table.declared_nodes as usize != graph.nodes.len() {
				warn!("anim graph header declares {} nodes, decoded {}", table.declared_nodes, graph.nodes.len());
			}
			let pending = mem::take(&mut table.pending_connections);
			graph.finish(&pending)?;
			Asset::AnimGraph(graph)
		}
	};
	Ok(asset)
}

#[cfg(test)]
mod tests;
