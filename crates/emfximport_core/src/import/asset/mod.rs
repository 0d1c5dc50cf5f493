mod actor;
mod anim_graph;
mod motion;
mod motion_set;
mod node_map;

/// Actor destination object and its parts.
pub use actor::{
	Actor, ActorInfo, LayerData, LayerType, LodLevel, MaterialCounts, MaterialLayer, Mesh, MorphMeshDeltas, MorphTarget, MorphTransform, Node,
	NodeGroup, NodeLimit, SkinInfluence, SkinRange, SkinningInfo, StandardMaterial, SubMesh, VertexLayer,
};
/// Anim graph destination object and its parts.
pub use anim_graph::{AnimGraph, GraphConnection, GraphNode, GraphNodeGroup, GraphParameter, ParameterGroup, StateTransition};
/// Skeletal motion destination object and its parts.
pub use motion::{
	EventTrack, MotionEvent, MotionEventTable, MotionInfo, PositionKey, RotationKey, ScaleKey, SkeletalMotion, SubMotion, WaveletChunk,
	WaveletInfo, WaveletMapping, WaveletSubMotion, SYNC_TRACK_NAME,
};
/// Motion set destination object.
pub use motion_set::{MotionEntry, MotionSet, MotionSetTree};
/// Node map destination object.
pub use node_map::{NodeMap, NodeMapEntry};
