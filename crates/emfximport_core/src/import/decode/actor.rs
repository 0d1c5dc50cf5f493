//! Actor chunks other than geometry: info, skeleton, materials, limits, LODs and groups.

use crate::import::asset::{ActorInfo, LodLevel, MaterialCounts, MaterialLayer, Node, NodeGroup, NodeLimit, StandardMaterial};
use crate::import::ids::actor;
use crate::import::{ChunkReader, ImportError, ImportState, Result};

pub(crate) fn decode_info_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let motion_extraction_mask = r.read_u32()?;
	let motion_extraction_node = r.read_index()?;
	let exporter_version = (r.read_u8()?, r.read_u8()?);
	r.skip(2)?;

	let info = ActorInfo {
		exporter_version,
		motion_extraction_node,
		motion_extraction_mask,
		..ActorInfo::default()
	};
	finish_info(r, state, info)
}

pub(crate) fn decode_info_v2(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let motion_extraction_mask = r.read_u32()?;
	let motion_extraction_node = r.read_index()?;
	let exporter_version = (r.read_u8()?, r.read_u8()?);
	let retarget_root_offset = r.read_f32()?;
	r.skip(2)?;

	let info = ActorInfo {
		exporter_version,
		motion_extraction_node,
		motion_extraction_mask,
		retarget_root_offset,
		..ActorInfo::default()
	};
	finish_info(r, state, info)
}

pub(crate) fn decode_info_v3(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let trajectory_node = r.read_index()?;
	let motion_extraction_node = r.read_index()?;
	let motion_extraction_mask = r.read_u32()?;
	let exporter_version = (r.read_u8()?, r.read_u8()?);
	let retarget_root_offset = r.read_f32()?;
	r.skip(2)?;

	let info = ActorInfo {
		exporter_version,
		motion_extraction_node,
		trajectory_node,
		motion_extraction_mask,
		retarget_root_offset,
		..ActorInfo::default()
	};
	finish_info(r, state, info)
}

// Every info version ends with the same four strings.
fn finish_info(r: &mut ChunkReader<'_>, state: &mut ImportState, mut info: ActorInfo) -> Result<()> {
	info.source_app = state.shared.read_string(r)?;
	info.original_file = state.shared.read_string(r)?;
	info.export_date = state.shared.read_string(r)?;
	let name = state.shared.read_string(r)?;

	let target = state.target.actor_mut(actor::INFO)?;
	target.name = name;
	target.info = Some(info);
	Ok(())
}

pub(crate) fn decode_nodes_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let num_nodes = r.read_u32()?;
	let num_root_nodes = r.read_u32()?;
	let target = state.target.actor_mut(actor::NODES)?;
	target.nodes.reserve(r.capacity(num_nodes, 140));

	for _ in 0..num_nodes {
		let rotation = r.read_quat()?;
		let scale_rotation = r.read_quat()?;
		let position = r.read_vec3()?;
		let scale = r.read_vec3()?;
		let shear = r.read_vec3()?;
		let skeletal_lods = r.read_u32()?;
		let motion_lods = r.read_u32()?;
		let parent = r.read_index()?;
		let _num_children = r.read_u32()?;
		let flags = r.read_u8()?;
		r.skip(3)?;
		let mut obb = [0.0_f32; 16];
		for value in &mut obb {
			*value = r.read_f32()?;
		}
		let importance = r.read_f32()?;
		let name = state.shared.read_string(r)?;

		let index = target.nodes.len() as u32;
		if let Some(parent) = parent.filter(|parent| *parent >= index) {
			return Err(ImportError::DanglingNodeIndex {
				what: "node parent",
				index: parent,
				count: target.nodes.len(),
			});
		}

		target.nodes.push(Node {
			name,
			parent,
			children: Vec::new(),
			rotation,
			scale_rotation,
			position,
			scale,
			shear,
			skeletal_lods,
			motion_lods,
			flags,
			obb,
			importance,
			is_attachment: false,
		});
	}

	let roots = target.nodes.iter().filter(|node| node.parent.is_none()).count();
	if roots != num_root_nodes as usize {
		log::warn!("actor declares {num_root_nodes} root nodes but {roots} nodes have no parent");
	}
	Ok(())
}

pub(crate) fn decode_std_material_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let ambient = r.read_color()?;
	let diffuse = r.read_color()?;
	let specular = r.read_color()?;
	let emissive = r.read_color()?;
	let shine = r.read_f32()?;
	let shine_strength = r.read_f32()?;
	let opacity = r.read_f32()?;
	let ior = r.read_f32()?;
	let double_sided = r.read_u8()? != 0;
	let wireframe = r.read_u8()? != 0;
	let transparency_type = r.read_u8()?;
	let declared_layers = r.read_u8()?;
	let name = state.shared.read_string(r)?;

	state.target.actor_mut(actor::STD_MATERIAL)?.materials.push(StandardMaterial {
		name,
		ambient,
		diffuse,
		specular,
		emissive,
		shine,
		shine_strength,
		opacity,
		ior,
		double_sided,
		wireframe,
		transparency_type,
		declared_layers,
		layers: Vec::new(),
	});
	Ok(())
}

pub(crate) fn decode_std_material_layer_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let amount = r.read_f32()?;
	let u_offset = r.read_f32()?;
	let v_offset = r.read_f32()?;
	let u_tiling = r.read_f32()?;
	let v_tiling = r.read_f32()?;
	let rotation = r.read_f32()?;
	let material = r.read_u16()?;
	let map_type = r.read_u8()?;
	r.skip(1)?;
	let texture = state.shared.read_string(r)?;

	let target = state.target.actor_mut(actor::STD_MATERIAL_LAYER)?;
	let count = target.materials.len();
	let Some(owner) = target.materials.get_mut(usize::from(material)) else {
		return Err(ImportError::DanglingMaterialIndex {
			what: "material layer",
			index: u32::from(material),
			count,
		});
	};

	owner.layers.push(MaterialLayer {
		map_type,
		texture,
		amount,
		u_offset,
		v_offset,
		u_tiling,
		v_tiling,
		rotation,
	});
	Ok(())
}

pub(crate) fn decode_material_info_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let counts = MaterialCounts {
		total: r.read_u32()?,
		standard: r.read_u32()?,
		fx: r.read_u32()?,
	};

	let target = state.target.actor_mut(actor::MATERIAL_INFO)?;
	target.materials.reserve(r.capacity(counts.standard, 1));
	target.material_counts = Some(counts);
	Ok(())
}

pub(crate) fn decode_limit_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let translation_min = r.read_vec3()?;
	let translation_max = r.read_vec3()?;
	let rotation_min = r.read_vec3()?;
	let rotation_max = r.read_vec3()?;
	let scale_min = r.read_vec3()?;
	let scale_max = r.read_vec3()?;
	let mut flags = [0_u8; 9];
	for flag in &mut flags {
		*flag = r.read_u8()?;
	}
	let node = r.read_u32()?;

	let target = state.target.actor_mut(actor::LIMIT)?;
	target.check_node("limit", node)?;
	target.limits.push(NodeLimit {
		node,
		translation_min,
		translation_max,
		rotation_min,
		rotation_max,
		scale_min,
		scale_max,
		flags,
	});
	Ok(())
}

pub(crate) fn decode_mesh_lod_levels_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let level = r.read_u32()?;
	let size = r.read_u32()?;
	let data = r.read_bytes(u64::from(size))?;

	state.target.actor_mut(actor::MESH_LOD_LEVELS)?.lod_levels.push(LodLevel { level, data });
	Ok(())
}

pub(crate) fn decode_node_groups_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let num_groups = r.read_u32()?;
	for _ in 0..num_groups {
		let num_nodes = r.read_u16()?;
		let disabled_on_default = r.read_u8()? != 0;
		r.skip(1)?;
		let name = state.shared.read_string(r)?;
		let mut nodes = Vec::with_capacity(r.capacity(u32::from(num_nodes), 2));
		for _ in 0..num_nodes {
			nodes.push(r.read_u16()?);
		}

		let target = state.target.actor_mut(actor::NODE_GROUPS)?;
		for node in &nodes {
			target.check_node("node group", u32::from(*node))?;
		}
		target.node_groups.push(NodeGroup {
			name,
			disabled_on_default,
			nodes,
		});
	}
	Ok(())
}

pub(crate) fn decode_attachment_nodes_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let count = r.read_u32()?;
	let target = state.target.actor_mut(actor::ATTACHMENT_NODES)?;
	for _ in 0..count {
		let node = u32::from(r.read_u16()?);
		target.check_node("attachment", node)?;
		target.nodes[node as usize].is_attachment = true;
	}
	Ok(())
}
