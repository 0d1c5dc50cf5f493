//! Geometry chunks: meshes, skinning and morph targets.

use log::{debug, warn};

use crate::import::asset::{LayerData, LayerType, Mesh, MorphMeshDeltas, MorphTarget, MorphTransform, SkinInfluence, SkinRange, SkinningInfo, SubMesh, VertexLayer};
use crate::import::ids::actor;
use crate::import::{ChunkReader, ImportError, ImportState, Result, Vec3};

pub(crate) fn decode_mesh_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let node = r.read_u32()?;
	let num_org_vertices = r.read_u32()?;
	let num_vertices = r.read_u32()?;
	let num_indices = r.read_u32()?;
	let num_sub_meshes = r.read_u32()?;
	let num_layers = r.read_u32()?;
	let is_collision = r.read_u8()? != 0;
	r.skip(3)?;

	let ImportState { settings, target, .. } = state;
	let settings = settings.actor(actor::MESH)?;
	let target = target.actor_mut(actor::MESH)?;

	let wanted = if is_collision { settings.load_collision_meshes } else { settings.load_meshes };
	if !wanted {
		debug!("skipping {} mesh of node {node}", if is_collision { "collision" } else { "render" });
		return r.skip_rest();
	}
	target.check_node("mesh", node)?;

	let mut layers = Vec::with_capacity(r.capacity(num_layers, 12));
	for _ in 0..num_layers {
		let layer_type = r.read_u32()?;
		let attribute_size = r.read_u32()?;
		let keep_originals = r.read_u8()? != 0;
		let is_scale = r.read_u8()? != 0;
		r.skip(2)?;

		let byte_len = u64::from(num_vertices) * u64::from(attribute_size);
		if !settings.loads_layer(layer_type) {
			r.skip(byte_len)?;
			continue;
		}

		let data = read_layer(r, layer_type, attribute_size, num_vertices)?;
		layers.push(VertexLayer {
			layer_type,
			attribute_size,
			keep_originals,
			is_scale,
			data,
		});
	}

	let mut sub_meshes = Vec::with_capacity(r.capacity(num_sub_meshes, 16));
	for _ in 0..num_sub_meshes {
		let sub_indices = r.read_u32()?;
		let sub_vertices = r.read_u32()?;
		let material = r.read_u32()?;
		let num_bones = r.read_u32()?;
		let indices = read_u32s(r, sub_indices)?;
		let bones = read_u32s(r, num_bones)?;
		for bone in &bones {
			target.check_node("sub mesh bone", *bone)?;
		}
		sub_meshes.push(SubMesh {
			material,
			num_vertices: sub_vertices,
			indices,
			bones,
		});
	}

	target.meshes.push(Mesh {
		node,
		is_collision,
		num_org_vertices,
		num_vertices,
		num_indices,
		layers,
		sub_meshes,
	});
	Ok(())
}

fn read_u32s(r: &mut ChunkReader<'_>, count: u32) -> Result<Vec<u32>> {
	let mut out = Vec::with_capacity(r.capacity(count, 4));
	for _ in 0..count {
		out.push(r.read_u32()?);
	}
	Ok(out)
}

fn read_values<T>(r: &mut ChunkReader<'_>, count: u32, size: u64, mut read: impl FnMut(&mut ChunkReader<'_>) -> Result<T>) -> Result<Vec<T>> {
	let mut out = Vec::with_capacity(r.capacity(count, size));
	for _ in 0..count {
		out.push(read(r)?);
	}
	Ok(out)
}

fn read_layer(r: &mut ChunkReader<'_>, layer_type: u32, attribute_size: u32, num_vertices: u32) -> Result<LayerData> {
	let Some(kind) = LayerType::from_id(layer_type) else {
		warn!("unknown vertex layer type {layer_type}, keeping {attribute_size}-byte attributes raw");
		let data = r.read_bytes(u64::from(num_vertices) * u64::from(attribute_size))?;
		return Ok(LayerData::Raw(data));
	};

	let expected = kind.attribute_size();
	if attribute_size != expected {
		return Err(ImportError::InvalidLayerSize {
			layer_type,
			size: attribute_size,
			expected,
		});
	}

	let size = u64::from(expected);
	Ok(match kind {
		LayerType::Positions | LayerType::Normals | LayerType::Bitangents => LayerData::Vec3(read_values(r, num_vertices, size, |r| r.read_vec3())?),
		LayerType::Tangents => LayerData::Vec4(read_values(r, num_vertices, size, |r| r.read_vec4())?),
		LayerType::Uvs => LayerData::Vec2(read_values(r, num_vertices, size, |r| r.read_vec2())?),
		LayerType::Colors128 => LayerData::Color(read_values(r, num_vertices, size, |r| r.read_color())?),
		LayerType::Colors32 | LayerType::OriginalVertexNumbers => LayerData::U32(read_values(r, num_vertices, size, |r| r.read_u32())?),
	})
}

pub(crate) fn decode_skinning_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let node = r.read_u32()?;
	let num_local_bones = r.read_u32()?;
	let num_influences = r.read_u32()?;
	let is_for_collision = r.read_u8()? != 0;
	r.skip(3)?;

	let ImportState { settings, target, .. } = state;
	let target = target.actor_mut(actor::SKINNING_INFO)?;
	target.check_node("skinning", node)?;

	let Some(num_org_vertices) = target.mesh(node, is_for_collision).map(|mesh| mesh.num_org_vertices) else {
		let settings = settings.actor(actor::SKINNING_INFO)?;
		let mesh_loaded = if is_for_collision { settings.load_collision_meshes } else { settings.load_meshes };
		if !mesh_loaded {
			return r.skip_rest();
		}
		return Err(ImportError::DanglingMeshReference {
			node,
			collision: is_for_collision,
		});
	};

	let mut influences = Vec::with_capacity(r.capacity(num_influences, 8));
	for _ in 0..num_influences {
		let weight = r.read_f32()?;
		let bone = r.read_u16()?;
		r.skip(2)?;
		target.check_node("skin influence", u32::from(bone))?;
		influences.push(SkinInfluence { weight, node: bone });
	}

	let mut table = Vec::with_capacity(r.capacity(num_org_vertices, 8));
	for _ in 0..num_org_vertices {
		table.push(SkinRange {
			start: r.read_u32()?,
			count: r.read_u32()?,
		});
	}

	target.skins.push(SkinningInfo {
		node,
		is_for_collision,
		num_local_bones,
		influences,
		table,
	});
	Ok(())
}

// Deltas are stored quantized: positions as u16 in [min, max], normals and tangents as u8 in [-1, 1].
fn dequantize_u16(raw: u16, min: f32, max: f32) -> f32 {
	min + (max - min) * (f32::from(raw) / f32::from(u16::MAX))
}

fn dequantize_u8(raw: u8) -> f32 {
	f32::from(raw) / f32::from(u8::MAX) * 2.0 - 1.0
}

fn read_unit_vectors(r: &mut ChunkReader<'_>, count: u32) -> Result<Vec<Vec3>> {
	read_values(r, count, 3, |r| {
		Ok(Vec3 {
			x: dequantize_u8(r.read_u8()?),
			y: dequantize_u8(r.read_u8()?),
			z: dequantize_u8(r.read_u8()?),
		})
	})
}

pub(crate) fn decode_morph_targets_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let num_targets = r.read_u32()?;
	let _lod = r.read_u32()?;

	for _ in 0..num_targets {
		let range_min = r.read_f32()?;
		let range_max = r.read_f32()?;
		let lod = r.read_u32()?;
		let num_mesh_deltas = r.read_u32()?;
		let num_transforms = r.read_u32()?;
		let phoneme_sets = r.read_u32()?;
		let name = state.shared.read_string(r)?;
		let target = state.target.actor_mut(actor::STD_PROG_MORPH_TARGETS)?;

		let mut mesh_deltas = Vec::with_capacity(r.capacity(num_mesh_deltas, 16));
		for _ in 0..num_mesh_deltas {
			let node = r.read_u32()?;
			let min = r.read_f32()?;
			let max = r.read_f32()?;
			let num_vertices = r.read_u32()?;
			target.check_node("morph mesh deltas", node)?;

			let positions = read_values(r, num_vertices, 6, |r| {
				Ok(Vec3 {
					x: dequantize_u16(r.read_u16()?, min, max),
					y: dequantize_u16(r.read_u16()?, min, max),
					z: dequantize_u16(r.read_u16()?, min, max),
				})
			})?;
			let normals = read_unit_vectors(r, num_vertices)?;
			let tangents = read_unit_vectors(r, num_vertices)?;
			let vertex_numbers = read_u32s(r, num_vertices)?;
			mesh_deltas.push(MorphMeshDeltas {
				node,
				vertex_numbers,
				positions,
				normals,
				tangents,
			});
		}

		let mut transforms = Vec::with_capacity(r.capacity(num_transforms, 60));
		for _ in 0..num_transforms {
			let node = r.read_u32()?;
			target.check_node("morph transform", node)?;
			transforms.push(MorphTransform {
				node,
				rotation: r.read_quat()?,
				scale_rotation: r.read_quat()?,
				position: r.read_vec3()?,
				scale: r.read_vec3()?,
			});
		}

		target.morph_targets.push(MorphTarget {
			name,
			range_min,
			range_max,
			lod,
			phoneme_sets,
			mesh_deltas,
			transforms,
		});
	}
	Ok(())
}
