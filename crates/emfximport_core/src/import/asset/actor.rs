use serde::Serialize;

use crate::import::{Color, ImportError, Quat, Result, Vec2, Vec3, Vec4};

/// Vertex attribute layer types understood by the mesh decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerType {
	/// Vertex positions.
	Positions,
	/// Vertex normals.
	Normals,
	/// Tangents with handedness in `w`.
	Tangents,
	/// Texture coordinates.
	Uvs,
	/// Packed 32-bit vertex colors.
	Colors32,
	/// Index of the original vertex each split vertex came from.
	OriginalVertexNumbers,
	/// Float RGBA vertex colors.
	Colors128,
	/// Bitangents.
	Bitangents,
}

impl LayerType {
	/// Map a file layer id to a known type.
	pub fn from_id(id: u32) -> Option<Self> {
		Some(match id {
			0 => Self::Positions,
			1 => Self::Normals,
			2 => Self::Tangents,
			3 => Self::Uvs,
			4 => Self::Colors32,
			5 => Self::OriginalVertexNumbers,
			6 => Self::Colors128,
			7 => Self::Bitangents,
			_ => return None,
		})
	}

	/// File layer id.
	pub fn id(self) -> u32 {
		match self {
			Self::Positions => 0,
			Self::Normals => 1,
			Self::Tangents => 2,
			Self::Uvs => 3,
			Self::Colors32 => 4,
			Self::OriginalVertexNumbers => 5,
			Self::Colors128 => 6,
			Self::Bitangents => 7,
		}
	}

	/// Bytes per vertex for this layer.
	pub fn attribute_size(self) -> u32 {
		match self {
			Self::Positions | Self::Normals | Self::Bitangents => 12,
			Self::Tangents | Self::Colors128 => 16,
			Self::Uvs => 8,
			Self::Colors32 | Self::OriginalVertexNumbers => 4,
		}
	}
}

/// Actor-wide metadata from the info chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActorInfo {
	/// Exporter version as `(high, low)`.
	pub exporter_version: (u8, u8),
	/// Application that produced the file.
	pub source_app: String,
	/// File the actor was exported from.
	pub original_file: String,
	/// Export date string.
	pub export_date: String,
	/// Node used for motion extraction.
	pub motion_extraction_node: Option<u32>,
	/// Node used as trajectory.
	pub trajectory_node: Option<u32>,
	/// Motion extraction component mask.
	pub motion_extraction_mask: u32,
	/// Root offset used when retargeting.
	pub retarget_root_offset: f32,
}

/// One node of the actor skeleton.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
	/// Node name.
	pub name: String,
	/// Parent node index.
	pub parent: Option<u32>,
	/// Child node indices, filled when the import finishes.
	pub children: Vec<u32>,
	/// Local bind rotation.
	pub rotation: Quat,
	/// Scale rotation.
	pub scale_rotation: Quat,
	/// Local bind position.
	pub position: Vec3,
	/// Local bind scale.
	pub scale: Vec3,
	/// Shear factors.
	pub shear: Vec3,
	/// Skeletal LOD bit mask.
	pub skeletal_lods: u32,
	/// Motion LOD bit mask.
	pub motion_lods: u32,
	/// Raw node flags.
	pub flags: u8,
	/// Oriented bounding box matrix.
	pub obb: [f32; 16],
	/// Importance factor for automatic motion LOD.
	pub importance: f32,
	/// Whether the node is an attachment point.
	pub is_attachment: bool,
}

/// Decoded per-vertex attribute values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum LayerData {
	/// Two-component values.
	Vec2(Vec<Vec2>),
	/// Three-component values.
	Vec3(Vec<Vec3>),
	/// Four-component values.
	Vec4(Vec<Vec4>),
	/// Float colors.
	Color(Vec<Color>),
	/// 32-bit integers.
	U32(Vec<u32>),
	/// Bytes of a layer type this crate does not interpret.
	Raw(Vec<u8>),
}

impl LayerData {
	/// Number of decoded elements.
	pub fn len(&self) -> usize {
		match self {
			Self::Vec2(values) => values.len(),
			Self::Vec3(values) => values.len(),
			Self::Vec4(values) => values.len(),
			Self::Color(values) => values.len(),
			Self::U32(values) => values.len(),
			Self::Raw(values) => values.len(),
		}
	}

	/// Whether the layer holds no elements.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// One vertex attribute layer of a mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexLayer {
	/// File layer id.
	pub layer_type: u32,
	/// Bytes per vertex.
	pub attribute_size: u32,
	/// Keep undeformed copies at runtime.
	pub keep_originals: bool,
	/// Layer stores scale values.
	pub is_scale: bool,
	/// Vertex values.
	pub data: LayerData,
}

/// Index range of a mesh sharing one material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubMesh {
	/// Material index.
	pub material: u32,
	/// Vertices used by this sub mesh.
	pub num_vertices: u32,
	/// Triangle indices.
	pub indices: Vec<u32>,
	/// Bones influencing this sub mesh.
	pub bones: Vec<u32>,
}

/// Mesh attached to an actor node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mesh {
	/// Owning node.
	pub node: u32,
	/// Collision rather than render mesh.
	pub is_collision: bool,
	/// Vertices before splitting along seams.
	pub num_org_vertices: u32,
	/// Vertex count of every layer.
	pub num_vertices: u32,
	/// Total index count.
	pub num_indices: u32,
	/// Kept vertex layers.
	pub layers: Vec<VertexLayer>,
	/// Sub meshes.
	pub sub_meshes: Vec<SubMesh>,
}

impl Mesh {
	/// First layer of `layer_type`, if it was loaded.
	pub fn layer(&self, layer_type: LayerType) -> Option<&VertexLayer> {
		self.layers.iter().find(|layer| layer.layer_type == layer_type.id())
	}
}

/// Single bone weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkinInfluence {
	/// Weight in `[0, 1]`.
	pub weight: f32,
	/// Influencing node.
	pub node: u16,
}

/// Influence range of one original vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkinRange {
	/// First influence.
	pub start: u32,
	/// Number of influences.
	pub count: u32,
}

/// Skinning data for one mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkinningInfo {
	/// Node of the skinned mesh.
	pub node: u32,
	/// Applies to the collision mesh.
	pub is_for_collision: bool,
	/// Distinct bones used.
	pub num_local_bones: u32,
	/// All influences.
	pub influences: Vec<SkinInfluence>,
	/// One range per original vertex.
	pub table: Vec<SkinRange>,
}

/// Texture layer of a standard material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialLayer {
	/// Map type (diffuse, bump, ...).
	pub map_type: u8,
	/// Texture name.
	pub texture: String,
	/// Blend amount.
	pub amount: f32,
	/// Horizontal offset.
	pub u_offset: f32,
	/// Vertical offset.
	pub v_offset: f32,
	/// Horizontal tiling.
	pub u_tiling: f32,
	/// Vertical tiling.
	pub v_tiling: f32,
	/// Rotation in radians.
	pub rotation: f32,
}

/// Standard material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardMaterial {
	/// Material name.
	pub name: String,
	/// Ambient color.
	pub ambient: Color,
	/// Diffuse color.
	pub diffuse: Color,
	/// Specular color.
	pub specular: Color,
	/// Self-illumination color.
	pub emissive: Color,
	/// Shine.
	pub shine: f32,
	/// Shine strength.
	pub shine_strength: f32,
	/// Opacity, `1.0` fully opaque.
	pub opacity: f32,
	/// Index of refraction.
	pub ior: f32,
	/// Render both faces.
	pub double_sided: bool,
	/// Render as wireframe.
	pub wireframe: bool,
	/// Transparency type code.
	pub transparency_type: u8,
	/// Layers announced by the material chunk.
	pub declared_layers: u8,
	/// Loaded texture layers.
	pub layers: Vec<MaterialLayer>,
}

/// Material totals announced before the material chunks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MaterialCounts {
	/// All materials.
	pub total: u32,
	/// Standard materials.
	pub standard: u32,
	/// Effect materials.
	pub fx: u32,
}

/// Transform limits of one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLimit {
	/// Limited node.
	pub node: u32,
	/// Minimum translation.
	pub translation_min: Vec3,
	/// Maximum translation.
	pub translation_max: Vec3,
	/// Minimum rotation angles.
	pub rotation_min: Vec3,
	/// Maximum rotation angles.
	pub rotation_max: Vec3,
	/// Minimum scale.
	pub scale_min: Vec3,
	/// Maximum scale.
	pub scale_max: Vec3,
	/// Per-axis activation flags.
	pub flags: [u8; 9],
}

/// Embedded actor used as a lower geometry level of detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LodLevel {
	/// LOD index.
	pub level: u32,
	/// Embedded actor file bytes.
	#[serde(skip)]
	pub data: Vec<u8>,
}

/// Per-mesh vertex deltas of a morph target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MorphMeshDeltas {
	/// Deformed mesh node.
	pub node: u32,
	/// Affected original vertices.
	pub vertex_numbers: Vec<u32>,
	/// Position deltas.
	pub positions: Vec<Vec3>,
	/// Normal deltas.
	pub normals: Vec<Vec3>,
	/// Tangent deltas.
	pub tangents: Vec<Vec3>,
}

/// Node transform applied by a morph target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MorphTransform {
	/// Transformed node.
	pub node: u32,
	/// Rotation.
	pub rotation: Quat,
	/// Scale rotation.
	pub scale_rotation: Quat,
	/// Position delta.
	pub position: Vec3,
	/// Scale delta.
	pub scale: Vec3,
}

/// Progressive morph target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MorphTarget {
	/// Target name.
	pub name: String,
	/// Slider minimum.
	pub range_min: f32,
	/// Slider maximum.
	pub range_max: f32,
	/// Geometry LOD the target belongs to.
	pub lod: u32,
	/// Phoneme set bit mask.
	pub phoneme_sets: u32,
	/// Mesh deformations.
	pub mesh_deltas: Vec<MorphMeshDeltas>,
	/// Node transformations.
	pub transforms: Vec<MorphTransform>,
}

/// Named group of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeGroup {
	/// Group name.
	pub name: String,
	/// Group starts disabled.
	pub disabled_on_default: bool,
	/// Member nodes.
	pub nodes: Vec<u16>,
}

/// Skeletal actor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Actor {
	/// Actor name.
	pub name: String,
	/// File the actor was loaded from.
	pub file_name: Option<String>,
	/// Metadata from the info chunk.
	pub info: Option<ActorInfo>,
	/// Skeleton nodes in file order.
	pub nodes: Vec<Node>,
	/// Nodes without a parent.
	pub root_nodes: Vec<u32>,
	/// Render and collision meshes.
	pub meshes: Vec<Mesh>,
	/// Skinning data.
	pub skins: Vec<SkinningInfo>,
	/// Material totals.
	pub material_counts: Option<MaterialCounts>,
	/// Standard materials in file order.
	pub materials: Vec<StandardMaterial>,
	/// Node limits.
	pub limits: Vec<NodeLimit>,
	/// Embedded geometry LODs.
	pub lod_levels: Vec<LodLevel>,
	/// Morph targets.
	pub morph_targets: Vec<MorphTarget>,
	/// Node groups.
	pub node_groups: Vec<NodeGroup>,
}

impl Actor {
	/// Mesh owned by `node` of the requested kind.
	pub fn mesh(&self, node: u32, collision: bool) -> Option<&Mesh> {
		self.meshes.iter().find(|mesh| mesh.node == node && mesh.is_collision == collision)
	}

	/// Node with the given name.
	pub fn find_node(&self, name: &str) -> Option<(u32, &Node)> {
		self.nodes.iter().enumerate().find(|(_, node)| node.name == name).map(|(index, node)| (index as u32, node))
	}

	pub(crate) fn check_node(&self, what: &'static str, index: u32) -> Result<()> {
		if (index as usize) < self.nodes.len() {
			return Ok(());
		}
		Err(ImportError::DanglingNodeIndex {
			what,
			index,
			count: self.nodes.len(),
		})
	}

	/// Rebuild child lists and root nodes from parent links.
	pub(crate) fn finish(&mut self) {
		self.root_nodes.clear();
		for node in &mut self.nodes {
			node.children.clear();
		}
		for index in 0..self.nodes.len() {
			match self.nodes[index].parent {
				Some(parent) => self.nodes[parent as usize].children.push(index as u32),
				None => self.root_nodes.push(index as u32),
			}
		}
	}
}
