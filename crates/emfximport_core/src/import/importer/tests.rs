use emfximport_testkit::{AssetFileBuilder, ByteOrder};

use crate::import::asset::MotionSetTree;
use crate::import::ids::{actor, anim_graph, motion_set, node_map};
use crate::import::{
	ActorSettings, AnimGraphSettings, Asset, ByteSource, FileKind, ImportError, Importer, MotionSetSettings, NodeMapSettings,
	SettingsBundle, SkeletalMotionSettings, SliceSource,
};

fn importer() -> Importer {
	Importer::new().expect("standard registry")
}

fn motion_sets(order: ByteOrder) -> AssetFileBuilder {
	AssetFileBuilder::motion_set(order)
		.chunk(motion_set::MOTION_SET, 1, |w| {
			w.index(None).u32(1).string("Root");
			w.string("idle.motion").string("idle");
		})
		.chunk(motion_set::MOTION_SET, 1, |w| {
			w.u32(0).u32(2).string("Combat");
			w.string("punch.motion").string("punch");
			w.string("kick.motion").string("kick");
		})
}

#[test]
fn motion_set_tree_links_children() {
	let bytes = motion_sets(ByteOrder::Big).finish();
	let settings = MotionSetSettings {
		owned_by_runtime: true,
		..MotionSetSettings::default()
	};
	let tree = importer().load_motion_set_bytes(&bytes, &settings).expect("sets load");

	assert!(tree.owned_by_runtime);
	assert_eq!(tree.sets.len(), 2);
	let root = tree.root().expect("root set");
	assert_eq!(root.name, "Root");
	assert_eq!(root.children, vec![1]);
	let combat = tree.find("Combat").expect("combat set");
	assert_eq!(combat.parent, Some(0));
	assert_eq!(combat.entry("kick").map(|entry| entry.file_name.as_str()), Some("kick.motion"));
}

#[test]
fn empty_motion_set_tree_has_no_root() {
	let tree = MotionSetTree {
		file_name: None,
		owned_by_runtime: false,
		sets: Vec::new(),
	};
	assert!(tree.root().is_none());
	assert!(tree.find("Root").is_none());
}

#[test]
fn motion_set_parent_must_precede_child() {
	let bytes = AssetFileBuilder::motion_set(ByteOrder::Little)
		.chunk(motion_set::MOTION_SET, 1, |w| {
			w.u32(3).u32(0).string("Orphan");
		})
		.finish();
	let err = importer().load_motion_set_bytes(&bytes, &MotionSetSettings::default()).expect_err("parent 3 missing");
	assert!(matches!(err, ImportError::DanglingMotionSet { parent: 3, count: 0, .. }));
}

#[test]
fn motion_set_file_without_sets_fails() {
	let bytes = AssetFileBuilder::motion_set(ByteOrder::Little).finish();
	let err = importer().load_motion_set_bytes(&bytes, &MotionSetSettings::default()).expect_err("no sets");
	assert!(matches!(err, ImportError::MissingMotionSet));
}

#[test]
fn non_legacy_payloads_are_reported() {
	let xml = b"<ObjectStream version=\"3\">";
	let err = importer().load_motion_set_bytes(xml, &MotionSetSettings::default()).expect_err("not chunked");
	assert!(matches!(err, ImportError::NotLegacyFormat { expected: FileKind::MotionSet }));
	let err = importer().load_anim_graph_bytes(xml, &AnimGraphSettings::default()).expect_err("not chunked");
	assert!(matches!(err, ImportError::NotLegacyFormat { expected: FileKind::AnimGraph }));
}

#[test]
fn node_map_loads_pairs_or_only_its_header() {
	let bytes = AssetFileBuilder::node_map(ByteOrder::Little)
		.chunk(node_map::NODE_MAP, 1, |w| {
			w.u32(2).string("hero.actor");
			w.string("l_hand").string("r_hand");
			w.string("l_foot").string("r_foot");
		})
		.finish();

	let map = importer().load_node_map_bytes(&bytes, &NodeMapSettings::default()).expect("map loads");
	assert_eq!(map.source_actor, "hero.actor");
	assert_eq!(map.lookup("l_foot"), Some("r_foot"));

	let settings = NodeMapSettings {
		load_nodes: false,
		..NodeMapSettings::default()
	};
	let map = importer().load_node_map_bytes(&bytes, &settings).expect("header only");
	assert_eq!(map.declared_entries, 2);
	assert!(map.entries.is_empty());
}

#[test]
fn every_loader_rejects_unknown_magic() {
	let bytes = b"XXXX\x01\x00\x00\x00";
	let importer = importer();
	let mut source = SliceSource::new(bytes);
	assert_eq!(importer.check_stream_type(&mut source).expect("classified"), FileKind::Unknown);

	assert!(matches!(
		importer.load_actor_bytes(bytes, &ActorSettings::default()),
		Err(ImportError::UnknownMagic { expected: FileKind::Actor, .. })
	));
	assert!(matches!(
		importer.load_skeletal_motion_bytes(bytes, &SkeletalMotionSettings::default()),
		Err(ImportError::UnknownMagic { .. })
	));
	assert!(matches!(
		importer.load_node_map_bytes(bytes, &NodeMapSettings::default()),
		Err(ImportError::UnknownMagic { .. })
	));
	assert!(matches!(
		importer.load_motion_set_bytes(bytes, &MotionSetSettings::default()),
		Err(ImportError::NotLegacyFormat { .. })
	));
	assert!(matches!(
		importer.load_anim_graph_bytes(bytes, &AnimGraphSettings::default()),
		Err(ImportError::NotLegacyFormat { .. })
	));
	assert!(matches!(
		importer.load_bytes(bytes, &SettingsBundle::default()),
		Err(ImportError::UnknownMagic { magic, .. }) if &magic == b"XXXX"
	));
}

#[test]
fn typed_loader_rejects_other_kind() {
	let bytes = AssetFileBuilder::node_map(ByteOrder::Little).finish();
	let err = importer().load_actor_bytes(&bytes, &ActorSettings::default()).expect_err("node map is not an actor");
	assert!(matches!(
		err,
		ImportError::WrongFileKind {
			expected: FileKind::Actor,
			found: FileKind::NodeMap
		}
	));
}

#[test]
fn sniffing_loader_picks_kind_settings() {
	let bytes = AssetFileBuilder::actor(ByteOrder::Little)
		.chunk(actor::MATERIAL_INFO, 1, |w| {
			w.u32(4).u32(3).u32(1);
		})
		.finish();
	let mut bundle = SettingsBundle::default();
	let asset = importer().load_bytes(&bytes, &bundle).expect("actor sniffed");
	assert_eq!(asset.kind(), FileKind::Actor);

	bundle.actor.chunk_ids_to_ignore.insert(actor::MATERIAL_INFO);
	match importer().load_bytes(&bytes, &bundle).expect("actor sniffed") {
		Asset::Actor(actor) => assert!(actor.material_counts.is_none()),
		other => panic!("expected actor, got {:?}", other.kind()),
	}
}

#[test]
fn caller_settings_are_not_normalized_in_place() {
	let settings = ActorSettings {
		load_meshes: false,
		..ActorSettings::default()
	};
	let bytes = AssetFileBuilder::actor(ByteOrder::Little).finish();
	importer().load_actor_bytes(&bytes, &settings).expect("empty actor loads");
	assert!(settings.load_skinning_info);
}

#[test]
fn importer_is_shareable_across_threads() {
	fn assert_send_sync<T: Send + Sync>() {}
	assert_send_sync::<Importer>();

	let importer = importer();
	let bytes = AssetFileBuilder::actor(ByteOrder::Big).finish();
	std::thread::scope(|scope| {
		for _ in 0..4 {
			scope.spawn(|| importer.load_actor_bytes(&bytes, &ActorSettings::default()).expect("concurrent load"));
		}
	});
}

fn after_prefix(file: Vec<u8>) -> Vec<u8> {
	let mut bytes = b"pad".to_vec();
	bytes.extend(file);
	bytes
}

fn at_prefix_end(bytes: &[u8]) -> SliceSource<'_> {
	let mut source = SliceSource::new(bytes);
	source.seek(3).expect("seek past prefix");
	source
}

#[test]
fn stream_loaders_start_at_the_current_offset() {
	let importer = importer();
	let actor = after_prefix(
		AssetFileBuilder::actor(ByteOrder::Little)
			.chunk(actor::INFO, 1, |w| {
				w.u32(0).index(None).u8(1).u8(0).pad(2);
				w.string("").string("").string("").string("Hero");
			})
			.finish(),
	);
	let motion = after_prefix(AssetFileBuilder::motion(ByteOrder::Big).finish());
	let sets = after_prefix(motion_sets(ByteOrder::Little).finish());
	let map = after_prefix(
		AssetFileBuilder::node_map(ByteOrder::Big)
			.chunk(node_map::NODE_MAP, 1, |w| {
				w.u32(0).string("hero.actor");
			})
			.finish(),
	);
	let graph = after_prefix(
		AssetFileBuilder::anim_graph(ByteOrder::Little, 1, "Graph")
			.chunk(anim_graph::NODE, 1, |w| {
				w.u32(1).index(None).u32(1).i32(0).i32(0).u32(0).u8(0).pad(3).string("Root").u32(0);
			})
			.finish(),
	);

	let loaded = importer.load_actor(&mut at_prefix_end(&actor), &ActorSettings::default()).expect("actor after prefix");
	assert_eq!(loaded.name, "Hero");
	importer
		.load_skeletal_motion(&mut at_prefix_end(&motion), &SkeletalMotionSettings::default())
		.expect("motion after prefix");
	let tree = importer.load_motion_set(&mut at_prefix_end(&sets), &MotionSetSettings::default()).expect("sets after prefix");
	assert_eq!(tree.sets.len(), 2);
	let loaded = importer.load_node_map(&mut at_prefix_end(&map), &NodeMapSettings::default()).expect("node map after prefix");
	assert_eq!(loaded.source_actor, "hero.actor");
	let loaded = importer.load_anim_graph(&mut at_prefix_end(&graph), &AnimGraphSettings::default()).expect("graph after prefix");
	assert_eq!(loaded.name, "Graph");

	let mut source = at_prefix_end(&sets);
	importer.load_motion_set(&mut source, &MotionSetSettings::default()).expect("sets after prefix");
	assert_eq!(source.position(), sets.len() as u64);
}

#[test]
fn legacy_check_leaves_the_stream_where_it_was() {
	let xml = after_prefix(b"<ObjectStream version=\"3\">".to_vec());
	let mut source = at_prefix_end(&xml);
	let err = importer().load_anim_graph(&mut source, &AnimGraphSettings::default()).expect_err("not chunked");
	assert!(matches!(err, ImportError::NotLegacyFormat { expected: FileKind::AnimGraph }));
	assert_eq!(source.position(), 3);
}
