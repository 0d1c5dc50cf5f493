use emfximport_testkit::{AssetFileBuilder, ByteOrder};

use crate::import::{ByteSource, Endian, FileHeader, FileKind, GraphInfo, ImportError, SliceSource, classify};

#[test]
fn reads_actor_header_fields() {
	let bytes = AssetFileBuilder::actor(ByteOrder::Big).finish();
	let mut source = SliceSource::new(&bytes);
	let header = FileHeader::read(&mut source, FileKind::Actor).expect("actor header parses");

	assert_eq!(header.kind, FileKind::Actor);
	assert_eq!(header.endian, Endian::Big);
	assert_eq!(header.hi_version, 1);
	assert_eq!(header.mul_order, Some(0));
	assert_eq!(source.position(), 8);
}

#[test]
fn motion_request_accepts_wavelet_magic() {
	let bytes = AssetFileBuilder::wavelet_motion(ByteOrder::Little).finish();
	let mut source = SliceSource::new(&bytes);
	let header = FileHeader::read(&mut source, FileKind::SkeletalMotion).expect("wavelet header parses");
	assert_eq!(header.kind, FileKind::WaveletSkeletalMotion);
}

#[test]
fn rejects_invalid_endian_marker() {
	let bytes = [b'N', b'O', b'M', b'P', 1, 0, 7];
	let mut source = SliceSource::new(&bytes);
	let err = FileHeader::read(&mut source, FileKind::NodeMap).expect_err("marker 7 rejected");
	assert!(matches!(err, ImportError::InvalidEndianMarker { kind: FileKind::NodeMap, marker: 7 }));
}

#[test]
fn anim_graph_header_converts_counts_and_strings() {
	let bytes = AssetFileBuilder::anim_graph(ByteOrder::Big, 3, "Locomotion").finish();
	let mut source = SliceSource::new(&bytes);
	let header = FileHeader::read(&mut source, FileKind::AnimGraph).expect("graph header parses");
	let counts = header.graph.expect("graph counts present");
	assert_eq!(counts.file_version, 1);
	assert_eq!(counts.num_nodes, 3);
	assert_eq!(source.position(), 25);

	let info = GraphInfo::read(&mut source, header.endian).expect("graph strings parse");
	assert_eq!(info.name, "Locomotion");
	assert!(info.editor_build.is_empty());
	assert!(source.is_eof());
}

#[test]
fn classify_finds_each_kind_and_rewinds() {
	let cases = [
		(AssetFileBuilder::actor(ByteOrder::Little).finish(), FileKind::Actor),
		(AssetFileBuilder::motion(ByteOrder::Little).finish(), FileKind::SkeletalMotion),
		(AssetFileBuilder::wavelet_motion(ByteOrder::Big).finish(), FileKind::WaveletSkeletalMotion),
		(AssetFileBuilder::motion_set(ByteOrder::Little).finish(), FileKind::MotionSet),
		(AssetFileBuilder::node_map(ByteOrder::Big).finish(), FileKind::NodeMap),
		(AssetFileBuilder::anim_graph(ByteOrder::Little, 0, "g").finish(), FileKind::AnimGraph),
	];

	for (bytes, expected) in cases {
		let mut source = SliceSource::new(&bytes);
		source.forward(3).expect("forward");
		assert_eq!(classify(&mut source).expect("classify runs"), expected);
		assert_eq!(source.position(), 0);
	}
}

#[test]
fn unknown_magic_is_classified_unknown() {
	let bytes = b"XXXX\x01\x00\x00\x00".to_vec();
	let mut source = SliceSource::new(&bytes);
	assert_eq!(classify(&mut source).expect("classify runs"), FileKind::Unknown);
	assert_eq!(source.position(), 0);

	for kind in FileKind::PROBE_ORDER {
		source.seek(0).expect("rewind");
		let err = FileHeader::read(&mut source, kind).expect_err("every kind rejects XXXX");
		assert!(matches!(err, ImportError::UnknownMagic { magic, .. } if magic == *b"XXXX"));
	}
}

#[test]
fn bad_marker_is_not_a_classification_match() {
	let bytes = [b'A', b'C', b'T', b'R', 1, 0, 9, 0];
	let mut source = SliceSource::new(&bytes);
	assert_eq!(classify(&mut source).expect("classify runs"), FileKind::Unknown);
}
