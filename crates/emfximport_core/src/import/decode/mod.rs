//! Chunk decoders and the table the standard registry is built from.

mod actor;
mod anim_graph;
mod events;
mod mesh;
mod motion;
mod motion_set;
mod node_map;

use crate::import::DecoderUnit;
use crate::import::ids::{self, anim_graph as graph, motion as mot};

/// Every decoder unit known to the importer, one entry per `(chunk id, version)`.
pub(crate) static STANDARD_DECODERS: &[DecoderUnit] = &[
	DecoderUnit::new(ids::actor::INFO, 1, "actor.info", actor::decode_info_v1),
	DecoderUnit::new(ids::actor::INFO, 2, "actor.info", actor::decode_info_v2),
	DecoderUnit::new(ids::actor::INFO, 3, "actor.info", actor::decode_info_v3),
	DecoderUnit::new(ids::actor::NODES, 1, "actor.nodes", actor::decode_nodes_v1),
	DecoderUnit::new(ids::actor::MESH, 1, "actor.mesh", mesh::decode_mesh_v1),
	DecoderUnit::new(ids::actor::SKINNING_INFO, 1, "actor.skinning_info", mesh::decode_skinning_v1),
	DecoderUnit::new(ids::actor::STD_MATERIAL, 1, "actor.std_material", actor::decode_std_material_v1),
	DecoderUnit::new(ids::actor::STD_MATERIAL_LAYER, 1, "actor.std_material_layer", actor::decode_std_material_layer_v1),
	DecoderUnit::new(ids::actor::MATERIAL_INFO, 1, "actor.material_info", actor::decode_material_info_v1),
	DecoderUnit::new(ids::actor::LIMIT, 1, "actor.limit", actor::decode_limit_v1),
	DecoderUnit::new(ids::actor::MESH_LOD_LEVELS, 1, "actor.mesh_lod_levels", actor::decode_mesh_lod_levels_v1),
	DecoderUnit::new(ids::actor::STD_PROG_MORPH_TARGETS, 1, "actor.std_prog_morph_targets", mesh::decode_morph_targets_v1),
	DecoderUnit::new(ids::actor::NODE_GROUPS, 1, "actor.node_groups", actor::decode_node_groups_v1),
	DecoderUnit::new(ids::actor::ATTACHMENT_NODES, 1, "actor.attachment_nodes", actor::decode_attachment_nodes_v1),
	DecoderUnit::new(mot::INFO, 1, "motion.info", motion::decode_info_v1),
	DecoderUnit::new(mot::INFO, 2, "motion.info", motion::decode_info_v2),
	DecoderUnit::new(mot::INFO, 3, "motion.info", motion::decode_info_v3),
	DecoderUnit::new(mot::SUB_MOTIONS, 1, "motion.sub_motions", motion::decode_sub_motions_v1),
	DecoderUnit::new(mot::SUB_MOTIONS, 2, "motion.sub_motions", motion::decode_sub_motions_v2),
	DecoderUnit::new(mot::SUB_MOTIONS, 3, "motion.sub_motions", motion::decode_sub_motions_v3),
	DecoderUnit::new(mot::WAVELET_INFO, 1, "motion.wavelet_info", motion::decode_wavelet_info_v1),
	DecoderUnit::new(ids::MOTION_EVENT_TABLE, 1, "motion_event_table", events::decode_event_table_v1),
	DecoderUnit::new(ids::motion_set::MOTION_SET, 1, "motion_set", motion_set::decode_motion_set_v1),
	DecoderUnit::new(ids::node_map::NODE_MAP, 1, "node_map", node_map::decode_node_map_v1),
	DecoderUnit::new(graph::NODE, 1, "anim_graph.node", anim_graph::decode_node_v1),
	DecoderUnit::new(graph::STATE_TRANSITIONS, 1, "anim_graph.state_transitions", anim_graph::decode_state_transitions_v1),
	DecoderUnit::new(graph::NODE_CONNECTIONS, 1, "anim_graph.node_connections", anim_graph::decode_node_connections_v1),
	DecoderUnit::new(graph::PARAMETERS, 1, "anim_graph.parameters", anim_graph::decode_parameters_v1),
	DecoderUnit::new(graph::NODE_GROUPS, 1, "anim_graph.node_groups", anim_graph::decode_node_groups_v1),
	DecoderUnit::new(graph::GROUP_PARAMETERS, 1, "anim_graph.group_parameters", anim_graph::decode_group_parameters_v1),
	DecoderUnit::new(graph::ADDITIONAL_INFO, 1, "anim_graph.additional_info", anim_graph::decode_additional_info_v1),
];
