use emfximport_testkit::{AssetFileBuilder, ByteOrder};

use crate::import::ids::{actor, anim_graph};
use crate::import::{ChunkScan, FileKind, ImportError, Registry, scan_chunk_stats};

#[test]
fn lists_chunks_with_their_decoders() {
	let builder = AssetFileBuilder::actor(ByteOrder::Big).chunk(actor::MATERIAL_INFO, 1, |w| {
		w.u32(0).u32(0).u32(0);
	});
	let second = builder.offset() as u64;
	let bytes = builder
		.chunk(777, 3, |w| {
			w.pad(6);
		})
		.finish();

	let registry = Registry::standard().expect("standard registry");
	let (header, scan) = ChunkScan::open(&bytes, &registry).expect("scan opens");
	assert_eq!(header.kind, FileKind::Actor);

	let chunks: Vec<_> = scan.collect::<Result<_, _>>().expect("chunks scan");
	assert_eq!(chunks.len(), 2);
	assert_eq!(chunks[0].offset, 8);
	assert_eq!(chunks[0].decoder, Some("actor.material_info"));
	assert_eq!(chunks[1].offset, second);
	assert_eq!(chunks[1].header.version, 3);
	assert_eq!(chunks[1].decoder, None);
}

#[test]
fn stats_count_ids_and_trailing_bytes() {
	let bytes = AssetFileBuilder::actor(ByteOrder::Little)
		.chunk(actor::MATERIAL_INFO, 1, |w| {
			w.u32(0).u32(0).u32(0);
		})
		.chunk(actor::MATERIAL_INFO, 1, |w| {
			w.u32(0).u32(0).u32(0);
		})
		.chunk(555, 1, |_| {})
		.trailing(&[0; 3])
		.finish();
	let registry = Registry::standard().expect("standard registry");
	let stats = scan_chunk_stats(&bytes, &registry).expect("stats");

	assert_eq!(stats.chunk_count, 3);
	assert_eq!(stats.unknown_count, 1);
	assert_eq!(stats.counts.get(&actor::MATERIAL_INFO), Some(&2));
	assert_eq!(stats.trailing_bytes, 3);
}

#[test]
fn anim_graph_scan_starts_after_header_strings() {
	let bytes = AssetFileBuilder::anim_graph(ByteOrder::Little, 1, "Graph")
		.chunk(anim_graph::ADDITIONAL_INFO, 1, |w| {
			w.u8(0).pad(3);
		})
		.finish();
	let registry = Registry::standard().expect("standard registry");
	let stats = scan_chunk_stats(&bytes, &registry).expect("stats");
	assert_eq!(stats.header.kind, FileKind::AnimGraph);
	assert_eq!(stats.counts.get(&anim_graph::ADDITIONAL_INFO), Some(&1));
	assert_eq!(stats.unknown_count, 0);
}

#[test]
fn oversized_chunk_is_reported() {
	let bytes = AssetFileBuilder::node_map(ByteOrder::Little).raw_chunk(600, 1, 64, &[0; 8]).finish();
	let registry = Registry::standard().expect("standard registry");
	let err = scan_chunk_stats(&bytes, &registry).expect_err("size beyond end");
	assert!(matches!(err, ImportError::ChunkOutOfRange { at: 7, chunk_id: 600, size: 64, rem: 8 }));
}
