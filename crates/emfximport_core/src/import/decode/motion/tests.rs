use emfximport_testkit::{AssetFileBuilder, ByteOrder, PayloadWriter};

use crate::import::asset::SYNC_TRACK_NAME;
use crate::import::ids::{self, motion};
use crate::import::{ImportError, Importer, SkeletalMotionSettings};

const IDENTITY: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

fn info_strings(w: &mut PayloadWriter, name: &str) {
	w.string("Exporter").string("walk.max").string("today").string(name);
}

/// Sub motion with full-precision rotations; `max_error` is written when given.
fn sub_motion(w: &mut PayloadWriter, name: &str, max_error: Option<f32>) {
	for _ in 0..4 {
		w.floats(&IDENTITY);
	}
	w.floats(&[0.0; 3]).floats(&[1.0; 3]).floats(&[0.0; 3]).floats(&[1.0; 3]);
	w.u32(2).u32(1).u32(0).u32(0);
	if let Some(value) = max_error {
		w.f32(value);
	}
	w.string(name);
	w.floats(&[0.0, 0.0, 0.0]).f32(0.0);
	w.floats(&[0.0, 1.0, 0.0]).f32(1.25);
	w.floats(&IDENTITY).f32(0.5);
}

fn importer() -> Importer {
	Importer::new().expect("standard registry")
}

#[test]
fn info_versions_fill_their_fields() {
	let v1 = AssetFileBuilder::motion(ByteOrder::Little)
		.chunk(motion::INFO, 1, |w| {
			w.u32(30).u8(2).u8(0).pad(2);
			info_strings(w, "Walk");
		})
		.finish();
	let v3 = AssetFileBuilder::motion(ByteOrder::Big)
		.chunk(motion::INFO, 3, |w| {
			w.f32(0.75).f32(0.01).u32(60).u32(3).u8(2).u8(1).pad(2);
			info_strings(w, "Run");
		})
		.finish();

	let importer = importer();
	let walk = importer.load_skeletal_motion_bytes(&v1, &SkeletalMotionSettings::default()).expect("v1 loads");
	assert_eq!(walk.name, "Walk");
	assert_eq!(walk.info.as_ref().map(|info| info.fps), Some(30));
	assert!(!walk.is_wavelet);

	let run = importer.load_skeletal_motion_bytes(&v3, &SkeletalMotionSettings::default()).expect("v3 loads");
	let info = run.info.expect("v3 info");
	assert_eq!(run.name, "Run");
	assert_eq!(info.fps, 60);
	assert_eq!(info.importance, 0.75);
	assert_eq!(info.motion_extraction_mask, 3);
	assert_eq!(info.exporter_version, (2, 1));
}

#[test]
fn sub_motion_versions_route_to_their_layout() {
	let v1 = AssetFileBuilder::motion(ByteOrder::Little)
		.chunk(motion::SUB_MOTIONS, 1, |w| {
			w.u32(1);
			sub_motion(w, "hips", None);
		})
		.finish();
	let v2 = AssetFileBuilder::motion(ByteOrder::Little)
		.chunk(motion::SUB_MOTIONS, 2, |w| {
			w.u32(1);
			sub_motion(w, "hips", Some(0.125));
		})
		.finish();

	let importer = importer();
	let first = importer.load_skeletal_motion_bytes(&v1, &SkeletalMotionSettings::default()).expect("v1 loads");
	let second = importer.load_skeletal_motion_bytes(&v2, &SkeletalMotionSettings::default()).expect("v2 loads");

	let hips = first.sub_motion("hips").expect("v1 hips");
	assert_eq!(hips.max_error, 0.0);
	assert_eq!(hips.position_keys.len(), 2);
	assert_eq!(hips.position_keys[1].value.y, 1.0);
	assert_eq!(hips.rotation_keys[0].time, 0.5);

	let hips = second.sub_motion("hips").expect("v2 hips");
	assert_eq!(hips.max_error, 0.125);
	assert_eq!(hips.position_keys, first.sub_motions[0].position_keys);
	assert_eq!(second.max_time, 1.25);
}

#[test]
fn quantized_sub_motions_expand_rotations() {
	let bytes = AssetFileBuilder::motion(ByteOrder::Big)
		.chunk(motion::SUB_MOTIONS, 3, |w| {
			w.u32(1);
			for _ in 0..4 {
				w.quat16([0, 0, 0, i16::MAX]);
			}
			w.floats(&[0.0; 12]);
			w.u32(0).u32(1).u32(0).u32(1);
			w.f32(0.0).string("spine");
			w.quat16([i16::MAX, 0, 0, 0]).f32(2.0);
			w.quat16([0, 0, 0, i16::MAX]).f32(0.5);
		})
		.finish();
	let motion = importer().load_skeletal_motion_bytes(&bytes, &SkeletalMotionSettings::default()).expect("v3 loads");
	let spine = &motion.sub_motions[0];
	assert_eq!(spine.pose_rotation.w, 1.0);
	assert_eq!(spine.rotation_keys[0].value.x, 1.0);
	assert_eq!(spine.scale_rotation_keys.len(), 1);
	assert_eq!(motion.max_time, 2.0);
}

#[test]
fn wavelet_info_keeps_compressed_streams() {
	let bytes = AssetFileBuilder::wavelet_motion(ByteOrder::Little)
		.chunk(motion::WAVELET_INFO, 1, |w| {
			w.u32(1).u32(8);
			w.u32(16).u32(12).u32(12);
			w.u32(1).u32(0).u32(0).u32(1);
			w.u32(4).u32(6).u32(6).u32(40).u32(0).u32(1);
			w.f32(0.001).f32(0.002).f32(0.003).f32(1.0 / 30.0).f32(0.25).f32(3.5);
			w.u8(1).u8(2).pad(2);
			w.u16(0).u16(0).u16(u16::MAX).u16(u16::MAX);
			for _ in 0..4 {
				w.quat16([0, 0, 0, i16::MAX]);
			}
			w.floats(&[0.0; 12]).f32(0.01).string("root");
			w.f32(1.0).f32(1.0).f32(1.0).f32(0.0);
			w.u32(2).u32(3).u32(1).u32(16).u32(24).u32(8);
			w.bytes(&[1, 2]).bytes(&[3, 4, 5]).bytes(&[6]);
		})
		.finish();
	let motion = importer().load_skeletal_motion_bytes(&bytes, &SkeletalMotionSettings::default()).expect("wavelet loads");

	assert!(motion.is_wavelet);
	let info = motion.wavelet.as_ref().expect("wavelet info");
	assert_eq!(info.samples_per_chunk, 8);
	assert_eq!(info.compressor, 2);
	assert_eq!(info.mappings[0].scale, u16::MAX);
	assert_eq!(info.sub_motions[0].name, "root");
	assert_eq!(info.chunks[0].rotation_data, vec![1, 2]);
	assert_eq!(info.chunks[0].position_data, vec![3, 4, 5]);
	assert_eq!(info.chunks[0].scale_data, vec![6]);
	assert_eq!(info.chunks[0].bit_counts, [16, 24, 8]);
	assert_eq!(motion.max_time, 3.5);
}

fn event_table(w: &mut PayloadWriter, type_index: u32) {
	w.u32(1);
	w.u32(2).u32(1).u32(1).u8(1).pad(3).string("Footsteps");
	w.string("FOOT").string("left");
	w.f32(0.1).f32(0.1).u32(0).u16(0).pad(2);
	w.f32(0.6).f32(0.7).u32(type_index).u16(0).pad(2);
}

#[test]
fn event_table_resolves_strings_and_adds_sync_track() {
	let bytes = AssetFileBuilder::motion(ByteOrder::Big).chunk(ids::MOTION_EVENT_TABLE, 1, |w| event_table(w, 0)).finish();
	let motion = importer().load_skeletal_motion_bytes(&bytes, &SkeletalMotionSettings::default()).expect("events load");

	let tracks = &motion.event_table.tracks;
	assert_eq!(tracks.len(), 2);
	assert_eq!(tracks[0].name, SYNC_TRACK_NAME);
	assert_eq!(tracks[1].name, "Footsteps");
	assert_eq!(tracks[1].events[1].event_type, "FOOT");
	assert_eq!(tracks[1].events[1].parameters, "left");
	assert_eq!(tracks[1].events[1].end_time, 0.7);
}

#[test]
fn event_with_bad_type_index_fails() {
	let bytes = AssetFileBuilder::motion(ByteOrder::Little).chunk(ids::MOTION_EVENT_TABLE, 1, |w| event_table(w, 5)).finish();
	let err = importer().load_skeletal_motion_bytes(&bytes, &SkeletalMotionSettings::default()).expect_err("index 5 dangling");
	assert!(matches!(err, ImportError::DanglingStringIndex { index: 5, count: 1, .. }));

	let settings = SkeletalMotionSettings {
		load_motion_events: false,
		..SkeletalMotionSettings::default()
	};
	let motion = importer().load_skeletal_motion_bytes(&bytes, &settings).expect("event table skipped");
	assert_eq!(motion.event_table.tracks.len(), 1);
	assert!(motion.event_table.sync_track().is_some());
}

#[test]
fn actor_chunk_in_motion_file_is_rejected() {
	let bytes = AssetFileBuilder::motion(ByteOrder::Little)
		.chunk(ids::actor::MATERIAL_INFO, 1, |w| {
			w.u32(0).u32(0).u32(0);
		})
		.finish();
	let err = importer().load_skeletal_motion_bytes(&bytes, &SkeletalMotionSettings::default()).expect_err("wrong target");
	assert!(matches!(err, ImportError::ChunkOutsideTarget { chunk_id: 13, .. }));
}
