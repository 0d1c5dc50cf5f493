use crate::import::asset::LayerType;
use crate::import::ids::{self, actor};
use crate::import::{ActorSettings, ImportSettings, SkeletalMotionSettings};

#[test]
fn disabling_meshes_cascades_to_dependents() {
	for (skinning, lods) in [(true, true), (true, false), (false, true), (false, false)] {
		let mut settings = ActorSettings {
			load_meshes: false,
			load_skinning_info: skinning,
			load_geometry_lods: lods,
			..ActorSettings::default()
		};
		settings.normalize();
		assert!(!settings.load_skinning_info);
		assert!(!settings.load_geometry_lods);
	}
}

#[test]
fn disabled_tangents_ignore_tangent_layers() {
	let mut settings = ActorSettings {
		load_tangents: false,
		..ActorSettings::default()
	};
	settings.normalize();
	assert!(!settings.loads_layer(LayerType::Tangents.id()));
	assert!(!settings.loads_layer(LayerType::Bitangents.id()));
	assert!(settings.loads_layer(LayerType::Uvs.id()));
}

#[test]
fn ignored_tangent_layer_turns_tangents_off() {
	let mut settings = ActorSettings::default();
	settings.layer_ids_to_ignore.insert(LayerType::Tangents.id());
	settings.normalize();
	assert!(!settings.load_tangents);
}

#[test]
fn required_layers_are_never_ignored() {
	let mut settings = ActorSettings::default();
	settings.layer_ids_to_ignore.extend([
		LayerType::Positions.id(),
		LayerType::Normals.id(),
		LayerType::OriginalVertexNumbers.id(),
		LayerType::Colors32.id(),
	]);
	settings.normalize();
	assert_eq!(settings.layer_ids_to_ignore.iter().copied().collect::<Vec<_>>(), vec![LayerType::Colors32.id()]);
}

#[test]
fn normalize_is_idempotent() {
	let mut settings = ActorSettings {
		load_meshes: false,
		load_tangents: false,
		..ActorSettings::default()
	};
	settings.normalize();
	let once = settings.clone();
	settings.normalize();
	assert_eq!(settings, once);
}

#[test]
fn feature_toggles_skip_their_chunks() {
	let settings = ActorSettings {
		load_skinning_info: false,
		load_limits: false,
		load_morph_targets: false,
		..ActorSettings::default()
	};
	assert!(settings.skips_chunk(actor::SKINNING_INFO));
	assert!(settings.skips_chunk(actor::LIMIT));
	assert!(settings.skips_chunk(actor::STD_PROG_MORPH_TARGETS));
	assert!(!settings.skips_chunk(actor::MESH));
	assert!(!settings.skips_chunk(actor::INFO));
}

#[test]
fn mesh_chunk_skipped_only_when_both_mesh_kinds_are_off() {
	let mut settings = ActorSettings {
		load_meshes: false,
		..ActorSettings::default()
	};
	assert!(!settings.skips_chunk(actor::MESH));
	settings.load_collision_meshes = false;
	assert!(settings.skips_chunk(actor::MESH));
}

#[test]
fn explicit_ignore_set_applies_to_every_kind() {
	let mut motion = SkeletalMotionSettings::default();
	motion.chunk_ids_to_ignore.insert(7777);
	let settings = ImportSettings::SkeletalMotion(motion);
	assert!(settings.skips_chunk(7777));
	assert!(!settings.skips_chunk(ids::MOTION_EVENT_TABLE));
}

#[test]
fn motion_events_toggle_skips_event_table() {
	let settings = SkeletalMotionSettings {
		load_motion_events: false,
		..SkeletalMotionSettings::default()
	};
	assert!(settings.skips_chunk(ids::MOTION_EVENT_TABLE));
}

#[test]
fn partial_json_keeps_remaining_defaults() {
	let settings: ActorSettings =
		serde_json::from_str(r#"{"load_meshes": false, "chunk_ids_to_ignore": [7]}"#).expect("settings json parses");
	assert!(!settings.load_meshes);
	assert!(settings.load_limits);
	assert!(settings.skips_chunk(actor::INFO));
}
