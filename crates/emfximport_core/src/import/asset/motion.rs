use serde::Serialize;

use crate::import::{Quat, Vec3};

/// Name of the event track used for motion synchronization.
pub const SYNC_TRACK_NAME: &str = "Sync";

/// Motion-wide metadata from the info chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MotionInfo {
	/// Exporter version as `(high, low)`.
	pub exporter_version: (u8, u8),
	/// Sample rate the motion was exported at.
	pub fps: u32,
	/// Importance factor for motion LOD.
	pub importance: f32,
	/// Maximum error accepted by key reduction.
	pub max_acceptable_error: f32,
	/// Motion extraction component mask.
	pub motion_extraction_mask: u32,
	/// Application that produced the file.
	pub source_app: String,
	/// File the motion was exported from.
	pub original_file: String,
	/// Export date string.
	pub export_date: String,
}

/// Position key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionKey {
	/// Key time in seconds.
	pub time: f32,
	/// Position.
	pub value: Vec3,
}

/// Rotation key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotationKey {
	/// Key time in seconds.
	pub time: f32,
	/// Rotation.
	pub value: Quat,
}

/// Scale key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleKey {
	/// Key time in seconds.
	pub time: f32,
	/// Scale.
	pub value: Vec3,
}

/// Keyframed animation of one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubMotion {
	/// Animated node name.
	pub name: String,
	/// Rotation of the first frame.
	pub pose_rotation: Quat,
	/// Bind pose rotation.
	pub bind_pose_rotation: Quat,
	/// Scale rotation of the first frame.
	pub pose_scale_rotation: Quat,
	/// Bind pose scale rotation.
	pub bind_pose_scale_rotation: Quat,
	/// Position of the first frame.
	pub pose_position: Vec3,
	/// Scale of the first frame.
	pub pose_scale: Vec3,
	/// Bind pose position.
	pub bind_pose_position: Vec3,
	/// Bind pose scale.
	pub bind_pose_scale: Vec3,
	/// Maximum error for motion LOD; zero when not stored.
	pub max_error: f32,
	/// Position track.
	pub position_keys: Vec<PositionKey>,
	/// Rotation track.
	pub rotation_keys: Vec<RotationKey>,
	/// Scale track.
	pub scale_keys: Vec<ScaleKey>,
	/// Scale rotation track.
	pub scale_rotation_keys: Vec<RotationKey>,
}

impl SubMotion {
	/// Latest key time over every track.
	pub fn max_time(&self) -> f32 {
		let positions = self.position_keys.iter().map(|key| key.time);
		let rotations = self.rotation_keys.iter().map(|key| key.time);
		let scales = self.scale_keys.iter().map(|key| key.time);
		let scale_rotations = self.scale_rotation_keys.iter().map(|key| key.time);
		positions.chain(rotations).chain(scales).chain(scale_rotations).fold(0.0, f32::max)
	}
}

/// Track indices of one wavelet sub motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaveletMapping {
	/// Position track.
	pub position: u16,
	/// Rotation track.
	pub rotation: u16,
	/// Scale rotation track.
	pub scale_rotation: u16,
	/// Scale track.
	pub scale: u16,
}

/// Bind and first-frame pose of one wavelet-compressed node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveletSubMotion {
	/// Animated node name.
	pub name: String,
	/// Rotation of the first frame.
	pub pose_rotation: Quat,
	/// Bind pose rotation.
	pub bind_pose_rotation: Quat,
	/// Scale rotation of the first frame.
	pub pose_scale_rotation: Quat,
	/// Bind pose scale rotation.
	pub bind_pose_scale_rotation: Quat,
	/// Position of the first frame.
	pub pose_position: Vec3,
	/// Scale of the first frame.
	pub pose_scale: Vec3,
	/// Bind pose position.
	pub bind_pose_position: Vec3,
	/// Bind pose scale.
	pub bind_pose_scale: Vec3,
	/// Maximum error for motion LOD.
	pub max_error: f32,
}

/// One compressed time slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveletChunk {
	/// Rotation dequantization scale.
	pub rotation_quant_scale: f32,
	/// Position dequantization scale.
	pub position_quant_scale: f32,
	/// Scale dequantization scale.
	pub scale_quant_scale: f32,
	/// Time of the first sample.
	pub start_time: f32,
	/// Bit counts of the compressed position, rotation and scale streams.
	pub bit_counts: [u32; 3],
	/// Compressed rotation stream.
	#[serde(skip)]
	pub rotation_data: Vec<u8>,
	/// Compressed position stream.
	#[serde(skip)]
	pub position_data: Vec<u8>,
	/// Compressed scale stream.
	#[serde(skip)]
	pub scale_data: Vec<u8>,
}

/// Wavelet compression parameters and compressed data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveletInfo {
	/// Samples in each chunk.
	pub samples_per_chunk: u32,
	/// Decompressed sizes of rotation, position and scale data.
	pub decompressed_bytes: [u32; 3],
	/// Track counts for rotation, scale rotation, scale and position.
	pub track_counts: [u32; 4],
	/// Per-chunk overhead in bytes.
	pub chunk_overhead: u32,
	/// Compressed, optimized and uncompressed sizes.
	pub sizes: [u32; 3],
	/// Offset of scale rotation data.
	pub scale_rotation_offset: u32,
	/// Position, rotation and scale quantization factors.
	pub quant_factors: [f32; 3],
	/// Time between samples.
	pub sample_spacing: f32,
	/// Duration of one chunk.
	pub seconds_per_chunk: f32,
	/// Motion duration.
	pub max_time: f32,
	/// Wavelet identifier.
	pub wavelet: u8,
	/// Compressor identifier.
	pub compressor: u8,
	/// Track mapping per sub motion.
	pub mappings: Vec<WaveletMapping>,
	/// Sub motion poses.
	pub sub_motions: Vec<WaveletSubMotion>,
	/// Compressed chunks.
	pub chunks: Vec<WaveletChunk>,
}

/// One timed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionEvent {
	/// Start time in seconds.
	pub start_time: f32,
	/// End time in seconds; equal to start for tick events.
	pub end_time: f32,
	/// Event type string.
	pub event_type: String,
	/// Event parameter string.
	pub parameters: String,
}

/// Named list of events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventTrack {
	/// Track name.
	pub name: String,
	/// Track enabled.
	pub enabled: bool,
	/// Events in file order.
	pub events: Vec<MotionEvent>,
}

impl EventTrack {
	fn sync() -> Self {
		Self {
			name: SYNC_TRACK_NAME.to_owned(),
			enabled: true,
			events: Vec::new(),
		}
	}
}

/// Event tracks of a motion.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MotionEventTable {
	/// Tracks; the sync track is first once the import finishes.
	pub tracks: Vec<EventTrack>,
}

impl MotionEventTable {
	/// The synchronization track.
	pub fn sync_track(&self) -> Option<&EventTrack> {
		self.tracks.first().filter(|track| track.name == SYNC_TRACK_NAME)
	}

	/// Make sure a sync track exists at index 0.
	pub fn ensure_sync_track(&mut self) {
		match self.tracks.iter().position(|track| track.name == SYNC_TRACK_NAME) {
			Some(0) => {}
			Some(index) => {
				let track = self.tracks.remove(index);
				self.tracks.insert(0, track);
			}
			None => self.tracks.insert(0, EventTrack::sync()),
		}
	}
}

/// Skeletal motion.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkeletalMotion {
	/// Motion name.
	pub name: String,
	/// File the motion was loaded from.
	pub file_name: Option<String>,
	/// Stored wavelet-compressed (`MOTW`).
	pub is_wavelet: bool,
	/// Metadata from the info chunk.
	pub info: Option<MotionInfo>,
	/// Keyframed sub motions.
	pub sub_motions: Vec<SubMotion>,
	/// Wavelet data.
	pub wavelet: Option<WaveletInfo>,
	/// Event tracks.
	pub event_table: MotionEventTable,
	/// Duration in seconds.
	pub max_time: f32,
}

impl SkeletalMotion {
	/// Sub motion animating `name`.
	pub fn sub_motion(&self, name: &str) -> Option<&SubMotion> {
		self.sub_motions.iter().find(|sub| sub.name == name)
	}

	pub(crate) fn finish(&mut self) {
		let keyed = self.sub_motions.iter().map(SubMotion::max_time).fold(0.0, f32::max);
		let wavelet = self.wavelet.as_ref().map_or(0.0, |info| info.max_time);
		self.max_time = keyed.max(wavelet);
		self.event_table.ensure_sync_track();
	}
}
