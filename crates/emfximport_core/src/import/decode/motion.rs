//! Skeletal motion chunks: info, keyframed sub motions and wavelet data.

use crate::import::asset::{MotionInfo, PositionKey, RotationKey, ScaleKey, SubMotion, WaveletChunk, WaveletInfo, WaveletMapping, WaveletSubMotion};
use crate::import::ids::motion;
use crate::import::{ChunkReader, ImportState, Quat, Result};

pub(crate) fn decode_info_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let fps = r.read_u32()?;
	let exporter_version = (r.read_u8()?, r.read_u8()?);
	r.skip(2)?;

	let info = MotionInfo {
		exporter_version,
		fps,
		..MotionInfo::default()
	};
	finish_info(r, state, info)
}

pub(crate) fn decode_info_v2(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let importance = r.read_f32()?;
	let max_acceptable_error = r.read_f32()?;
	let fps = r.read_u32()?;
	let exporter_version = (r.read_u8()?, r.read_u8()?);
	r.skip(2)?;

	let info = MotionInfo {
		exporter_version,
		fps,
		importance,
		max_acceptable_error,
		..MotionInfo::default()
	};
	finish_info(r, state, info)
}

pub(crate) fn decode_info_v3(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let importance = r.read_f32()?;
	let max_acceptable_error = r.read_f32()?;
	let fps = r.read_u32()?;
	let motion_extraction_mask = r.read_u32()?;
	let exporter_version = (r.read_u8()?, r.read_u8()?);
	r.skip(2)?;

	let info = MotionInfo {
		exporter_version,
		fps,
		importance,
		max_acceptable_error,
		motion_extraction_mask,
		..MotionInfo::default()
	};
	finish_info(r, state, info)
}

fn finish_info(r: &mut ChunkReader<'_>, state: &mut ImportState, mut info: MotionInfo) -> Result<()> {
	info.source_app = state.shared.read_string(r)?;
	info.original_file = state.shared.read_string(r)?;
	info.export_date = state.shared.read_string(r)?;
	let name = state.shared.read_string(r)?;

	let target = state.target.motion_mut(motion::INFO)?;
	target.name = name;
	target.info = Some(info);
	Ok(())
}

#[derive(Clone, Copy)]
enum Rotations {
	Full,
	Quantized,
}

impl Rotations {
	fn read(self, r: &mut ChunkReader<'_>) -> Result<Quat> {
		match self {
			Self::Full => r.read_quat(),
			Self::Quantized => r.read_quat16(),
		}
	}

	fn key_size(self) -> u64 {
		match self {
			Self::Full => 20,
			Self::Quantized => 12,
		}
	}
}

pub(crate) fn decode_sub_motions_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	read_sub_motions(r, state, Rotations::Full, false)
}

pub(crate) fn decode_sub_motions_v2(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	read_sub_motions(r, state, Rotations::Full, true)
}

pub(crate) fn decode_sub_motions_v3(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	read_sub_motions(r, state, Rotations::Quantized, true)
}

fn read_sub_motions(r: &mut ChunkReader<'_>, state: &mut ImportState, rotations: Rotations, has_max_error: bool) -> Result<()> {
	let count = r.read_u32()?;
	for _ in 0..count {
		let pose_rotation = rotations.read(r)?;
		let bind_pose_rotation = rotations.read(r)?;
		let pose_scale_rotation = rotations.read(r)?;
		let bind_pose_scale_rotation = rotations.read(r)?;
		let pose_position = r.read_vec3()?;
		let pose_scale = r.read_vec3()?;
		let bind_pose_position = r.read_vec3()?;
		let bind_pose_scale = r.read_vec3()?;
		let num_position_keys = r.read_u32()?;
		let num_rotation_keys = r.read_u32()?;
		let num_scale_keys = r.read_u32()?;
		let num_scale_rotation_keys = r.read_u32()?;
		let max_error = if has_max_error { r.read_f32()? } else { 0.0 };
		let name = state.shared.read_string(r)?;

		let mut position_keys = Vec::with_capacity(r.capacity(num_position_keys, 16));
		for _ in 0..num_position_keys {
			let value = r.read_vec3()?;
			position_keys.push(PositionKey { time: r.read_f32()?, value });
		}
		let rotation_keys = read_rotation_keys(r, rotations, num_rotation_keys)?;
		let mut scale_keys = Vec::with_capacity(r.capacity(num_scale_keys, 16));
		for _ in 0..num_scale_keys {
			let value = r.read_vec3()?;
			scale_keys.push(ScaleKey { time: r.read_f32()?, value });
		}
		let scale_rotation_keys = read_rotation_keys(r, rotations, num_scale_rotation_keys)?;

		state.target.motion_mut(motion::SUB_MOTIONS)?.sub_motions.push(SubMotion {
			name,
			pose_rotation,
			bind_pose_rotation,
			pose_scale_rotation,
			bind_pose_scale_rotation,
			pose_position,
			pose_scale,
			bind_pose_position,
			bind_pose_scale,
			max_error,
			position_keys,
			rotation_keys,
			scale_keys,
			scale_rotation_keys,
		});
	}
	Ok(())
}

fn read_rotation_keys(r: &mut ChunkReader<'_>, rotations: Rotations, count: u32) -> Result<Vec<RotationKey>> {
	let mut keys = Vec::with_capacity(r.capacity(count, rotations.key_size()));
	for _ in 0..count {
		let value = rotations.read(r)?;
		keys.push(RotationKey { time: r.read_f32()?, value });
	}
	Ok(keys)
}

pub(crate) fn decode_wavelet_info_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let num_chunks = r.read_u32()?;
	let samples_per_chunk = r.read_u32()?;
	let decompressed_bytes = [r.read_u32()?, r.read_u32()?, r.read_u32()?];
	let track_counts = [r.read_u32()?, r.read_u32()?, r.read_u32()?, r.read_u32()?];
	let chunk_overhead = r.read_u32()?;
	let sizes = [r.read_u32()?, r.read_u32()?, r.read_u32()?];
	let scale_rotation_offset = r.read_u32()?;
	let num_sub_motions = r.read_u32()?;
	let quant_factors = [r.read_f32()?, r.read_f32()?, r.read_f32()?];
	let sample_spacing = r.read_f32()?;
	let seconds_per_chunk = r.read_f32()?;
	let max_time = r.read_f32()?;
	let wavelet = r.read_u8()?;
	let compressor = r.read_u8()?;
	r.skip(2)?;

	let mut mappings = Vec::with_capacity(r.capacity(num_sub_motions, 8));
	for _ in 0..num_sub_motions {
		mappings.push(WaveletMapping {
			position: r.read_u16()?,
			rotation: r.read_u16()?,
			scale_rotation: r.read_u16()?,
			scale: r.read_u16()?,
		});
	}

	let mut sub_motions = Vec::with_capacity(r.capacity(num_sub_motions, 88));
	for _ in 0..num_sub_motions {
		let pose_rotation = r.read_quat16()?;
		let bind_pose_rotation = r.read_quat16()?;
		let pose_scale_rotation = r.read_quat16()?;
		let bind_pose_scale_rotation = r.read_quat16()?;
		let pose_position = r.read_vec3()?;
		let pose_scale = r.read_vec3()?;
		let bind_pose_position = r.read_vec3()?;
		let bind_pose_scale = r.read_vec3()?;
		let max_error = r.read_f32()?;
		let name = state.shared.read_string(r)?;
		sub_motions.push(WaveletSubMotion {
			name,
			pose_rotation,
			bind_pose_rotation,
			pose_scale_rotation,
			bind_pose_scale_rotation,
			pose_position,
			pose_scale,
			bind_pose_position,
			bind_pose_scale,
			max_error,
		});
	}

	let mut chunks = Vec::with_capacity(r.capacity(num_chunks, 40));
	for _ in 0..num_chunks {
		let rotation_quant_scale = r.read_f32()?;
		let position_quant_scale = r.read_f32()?;
		let scale_quant_scale = r.read_f32()?;
		let start_time = r.read_f32()?;
		let rotation_bytes = r.read_u32()?;
		let position_bytes = r.read_u32()?;
		let scale_bytes = r.read_u32()?;
		let bit_counts = [r.read_u32()?, r.read_u32()?, r.read_u32()?];
		chunks.push(WaveletChunk {
			rotation_quant_scale,
			position_quant_scale,
			scale_quant_scale,
			start_time,
			bit_counts,
			rotation_data: r.read_bytes(u64::from(rotation_bytes))?,
			position_data: r.read_bytes(u64::from(position_bytes))?,
			scale_data: r.read_bytes(u64::from(scale_bytes))?,
		});
	}

	state.target.motion_mut(motion::WAVELET_INFO)?.wavelet = Some(WaveletInfo {
		samples_per_chunk,
		decompressed_bytes,
		track_counts,
		chunk_overhead,
		sizes,
		scale_rotation_offset,
		quant_factors,
		sample_spacing,
		seconds_per_chunk,
		max_time,
		wavelet,
		compressor,
		mappings,
		sub_motions,
		chunks,
	});
	Ok(())
}

#[cfg(test)]
mod tests;
