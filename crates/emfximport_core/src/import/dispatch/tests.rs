use emfximport_testkit::{AssetFileBuilder, ByteOrder};

use crate::import::asset::Actor;
use crate::import::ids::actor;
use crate::import::{
	ActorSettings, ByteSource, ChunkReader, DecoderUnit, Endian, FileHeader, FileKind, ImportError, ImportSettings, ImportState, Registry,
	Result, SkeletalMotionSettings, SliceSource, Target, dispatch_all, process_next_chunk,
};

fn actor_state(endian: Endian, settings: ActorSettings) -> ImportState {
	let mut settings = ImportSettings::Actor(settings);
	settings.normalize();
	ImportState::new(endian, settings, Target::Actor(Actor::default()))
}

fn positioned(bytes: &[u8]) -> (SliceSource<'_>, FileHeader) {
	let mut source = SliceSource::new(bytes);
	let header = FileHeader::read(&mut source, FileKind::Actor).expect("actor header");
	(source, header)
}

fn tag_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let value = r.read_u32()?;
	state.target.actor_mut(r.header().chunk_id)?.name = format!("v1:{value}");
	Ok(())
}

fn tag_v2(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let value = r.read_u32()?;
	let extra = r.read_u32()?;
	state.target.actor_mut(r.header().chunk_id)?.name = format!("v2:{value}:{extra}");
	Ok(())
}

#[test]
fn cursor_advances_by_declared_size_for_every_outcome() {
	let builder = AssetFileBuilder::actor(ByteOrder::Little);
	let decoded_at = builder.offset();
	let builder = builder.chunk(actor::MATERIAL_INFO, 1, |w| {
		w.u32(2).u32(2).u32(0);
	});
	let skipped_at = builder.offset();
	let builder = builder.chunk(actor::LIMIT, 1, |w| {
		w.pad(81);
	});
	let unknown_at = builder.offset();
	let builder = builder.chunk(9_999, 1, |w| {
		w.pad(17);
	});
	let end = builder.offset();
	let bytes = builder.finish();

	let registry = Registry::standard().expect("standard registry");
	let (mut source, header) = positioned(&bytes);
	let settings = ActorSettings {
		load_limits: false,
		..ActorSettings::default()
	};
	let mut state = actor_state(header.endian, settings);

	let expected = [(decoded_at, skipped_at), (skipped_at, unknown_at), (unknown_at, end)];
	for (before, after) in expected {
		assert_eq!(source.position(), before as u64);
		assert!(process_next_chunk(&registry, &mut source, &mut state).expect("chunk processes"));
		assert_eq!(source.position(), after as u64);
	}
	assert!(!process_next_chunk(&registry, &mut source, &mut state).expect("end of stream"));

	let actor = state.target.actor_mut(0).expect("actor target");
	assert_eq!(actor.material_counts.map(|counts| counts.total), Some(2));
	assert!(actor.limits.is_empty());
}

#[test]
fn unknown_chunk_is_consumed_without_error() {
	let bytes = AssetFileBuilder::actor(ByteOrder::Big).chunk(4_242, 7, |w| {
		w.bytes(&[0xAB; 32]);
	});
	let bytes = bytes.finish();

	let registry = Registry::standard().expect("standard registry");
	let (mut source, header) = positioned(&bytes);
	let mut state = actor_state(header.endian, ActorSettings::default());

	assert!(process_next_chunk(&registry, &mut source, &mut state).expect("unknown chunk skipped"));
	assert!(!process_next_chunk(&registry, &mut source, &mut state).expect("end of stream"));
	assert!(source.is_eof());
}

#[test]
fn known_id_with_unregistered_version_is_skipped() {
	let bytes = AssetFileBuilder::actor(ByteOrder::Little)
		.chunk(actor::INFO, 99, |w| {
			w.pad(5);
		})
		.finish();
	let registry = Registry::standard().expect("standard registry");
	let (mut source, header) = positioned(&bytes);
	let mut state = actor_state(header.endian, ActorSettings::default());

	assert_eq!(dispatch_all(&registry, &mut source, &mut state).expect("dispatch"), 1);
	assert!(state.target.actor_mut(0).expect("actor").info.is_none());
}

#[test]
fn versions_route_to_their_own_decoder() {
	let units = [DecoderUnit::new(900, 1, "tag", tag_v1), DecoderUnit::new(900, 2, "tag", tag_v2)];
	let registry = Registry::build(&units).expect("registry");

	for (order, endian) in [(ByteOrder::Little, Endian::Little), (ByteOrder::Big, Endian::Big)] {
		let v1 = AssetFileBuilder::actor(order)
			.chunk(900, 1, |w| {
				w.u32(5);
			})
			.finish();
		let v2 = AssetFileBuilder::actor(order)
			.chunk(900, 2, |w| {
				w.u32(5).u32(6);
			})
			.finish();

		let (mut source, header) = positioned(&v1);
		assert_eq!(header.endian, endian);
		let mut state = actor_state(header.endian, ActorSettings::default());
		dispatch_all(&registry, &mut source, &mut state).expect("v1 dispatch");
		assert_eq!(state.target.actor_mut(900).expect("actor").name, "v1:5");

		let (mut source, header) = positioned(&v2);
		let mut state = actor_state(header.endian, ActorSettings::default());
		dispatch_all(&registry, &mut source, &mut state).expect("v2 dispatch");
		assert_eq!(state.target.actor_mut(900).expect("actor").name, "v2:5:6");
	}
}

#[test]
fn ignore_set_skips_registered_chunks() {
	let units = [DecoderUnit::new(900, 1, "tag", tag_v1)];
	let registry = Registry::build(&units).expect("registry");
	let bytes = AssetFileBuilder::actor(ByteOrder::Little)
		.chunk(900, 1, |w| {
			w.u32(5);
		})
		.finish();

	let (mut source, header) = positioned(&bytes);
	let settings = ActorSettings {
		chunk_ids_to_ignore: [900].into_iter().collect(),
		..ActorSettings::default()
	};
	let mut state = actor_state(header.endian, settings);
	assert_eq!(dispatch_all(&registry, &mut source, &mut state).expect("dispatch"), 1);
	assert!(state.target.actor_mut(900).expect("actor").name.is_empty());
}

#[test]
fn short_trailing_bytes_end_the_loop() {
	let bytes = AssetFileBuilder::actor(ByteOrder::Little)
		.chunk(actor::MATERIAL_INFO, 1, |w| {
			w.u32(1).u32(1).u32(0);
		})
		.trailing(&[1, 2, 3, 4, 5])
		.finish();
	let registry = Registry::standard().expect("standard registry");
	let (mut source, header) = positioned(&bytes);
	let mut state = actor_state(header.endian, ActorSettings::default());

	assert_eq!(dispatch_all(&registry, &mut source, &mut state).expect("tolerated"), 1);
	assert!(state.target.actor_mut(0).expect("actor").material_counts.is_some());
}

#[test]
fn payload_shorter_than_layout_is_a_decoder_failure() {
	let bytes = AssetFileBuilder::actor(ByteOrder::Little)
		.chunk(actor::MATERIAL_INFO, 1, |w| {
			w.u32(1);
		})
		.chunk(actor::MATERIAL_INFO, 1, |w| {
			w.u32(1).u32(1).u32(0);
		})
		.finish();
	let registry = Registry::standard().expect("standard registry");
	let (mut source, header) = positioned(&bytes);
	let mut state = actor_state(header.endian, ActorSettings::default());

	let err = dispatch_all(&registry, &mut source, &mut state).expect_err("reads stop at the chunk end");
	assert!(matches!(err, ImportError::UnexpectedEof { need: 4, rem: 0, .. }));
}

#[test]
fn decoder_for_another_kind_is_rejected() {
	let bytes = AssetFileBuilder::actor(ByteOrder::Little)
		.chunk(actor::MATERIAL_INFO, 1, |w| {
			w.u32(1).u32(1).u32(0);
		})
		.finish();
	let registry = Registry::standard().expect("standard registry");
	let (mut source, header) = positioned(&bytes);
	let settings = ImportSettings::SkeletalMotion(SkeletalMotionSettings::default());
	let mut state = ImportState::new(header.endian, settings, Target::SkeletalMotion(Default::default()));

	let err = dispatch_all(&registry, &mut source, &mut state).expect_err("actor chunk into motion");
	assert!(matches!(
		err,
		ImportError::ChunkOutsideTarget {
			chunk_id: 13,
			kind: FileKind::SkeletalMotion
		}
	));
}
