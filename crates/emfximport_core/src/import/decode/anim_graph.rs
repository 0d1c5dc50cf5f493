//! Anim graph chunks. Node connections are deferred until every node is known.

use crate::import::asset::{GraphNode, GraphNodeGroup, GraphParameter, ParameterGroup, StateTransition};
use crate::import::ids::anim_graph;
use crate::import::{ChunkReader, ImportError, ImportState, PendingConnection, Result};

pub(crate) fn decode_node_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let type_id = r.read_u32()?;
	let parent = r.read_index()?;
	let node_version = r.read_u32()?;
	let visual_pos = (r.read_i32()?, r.read_i32()?);
	let color = r.read_u32()?;
	let flags = r.read_u8()?;
	r.skip(3)?;
	let name = state.shared.read_string(r)?;
	let attributes = r.read_blob()?;

	let graph = state.target.anim_graph_mut(anim_graph::NODE)?;
	if let Some(parent) = parent {
		graph.check_node("node parent", parent)?;
	}
	graph.nodes.push(GraphNode {
		name,
		type_id,
		node_version,
		parent,
		children: Vec::new(),
		visual_pos,
		color,
		flags,
		attributes,
	});
	Ok(())
}

pub(crate) fn decode_state_transitions_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let state_machine = r.read_u32()?;
	let count = r.read_u32()?;

	let graph = state.target.anim_graph_mut(anim_graph::STATE_TRANSITIONS)?;
	graph.check_node("transition state machine", state_machine)?;

	graph.transitions.reserve(r.capacity(count, 20));
	for _ in 0..count {
		let source = r.read_index()?;
		let target = r.read_u32()?;
		let type_id = r.read_u32()?;
		let flags = r.read_u8()?;
		r.skip(3)?;
		let attributes = r.read_blob()?;

		if let Some(source) = source {
			graph.check_node("transition source", source)?;
		}
		graph.check_node("transition target", target)?;
		graph.transitions.push(StateTransition {
			state_machine,
			source,
			target,
			type_id,
			flags,
			attributes,
		});
	}
	Ok(())
}

pub(crate) fn decode_node_connections_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	state.target.anim_graph_mut(anim_graph::NODE_CONNECTIONS)?;

	let target_node = r.read_u32()?;
	let count = r.read_u32()?;
	let mut pending = Vec::with_capacity(r.capacity(count, 8));
	for _ in 0..count {
		pending.push(PendingConnection {
			target_node,
			source_node: r.read_u32()?,
			source_port: r.read_u16()?,
			target_port: r.read_u16()?,
		});
	}
	state.shared.graph_nodes()?.pending_connections.extend(pending);
	Ok(())
}

pub(crate) fn decode_parameters_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let count = r.read_u32()?;
	let mut parameters = Vec::with_capacity(r.capacity(count, 20));
	for _ in 0..count {
		let value_type = r.read_u32()?;
		let flags = r.read_u32()?;
		let name = state.shared.read_string(r)?;
		let description = state.shared.read_string(r)?;
		let default_value = r.read_blob()?;
		parameters.push(GraphParameter {
			name,
			description,
			value_type,
			flags,
			default_value,
		});
	}
	state.target.anim_graph_mut(anim_graph::PARAMETERS)?.parameters.extend(parameters);
	Ok(())
}

pub(crate) fn decode_node_groups_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let color = r.read_u32()?;
	let visible = r.read_u8()? != 0;
	r.skip(3)?;
	let name = state.shared.read_string(r)?;
	let count = r.read_u32()?;

	let graph = state.target.anim_graph_mut(anim_graph::NODE_GROUPS)?;
	let mut nodes = Vec::with_capacity(r.capacity(count, 4));
	for _ in 0..count {
		let node = r.read_u32()?;
		graph.check_node("node group", node)?;
		nodes.push(node);
	}
	graph.node_groups.push(GraphNodeGroup { name, color, visible, nodes });
	Ok(())
}

pub(crate) fn decode_group_parameters_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let count = r.read_u32()?;
	let name = state.shared.read_string(r)?;

	let graph = state.target.anim_graph_mut(anim_graph::GROUP_PARAMETERS)?;
	let mut parameters = Vec::with_capacity(r.capacity(count, 4));
	for _ in 0..count {
		let index = r.read_u32()?;
		if index as usize >= graph.parameters.len() {
			return Err(ImportError::DanglingParameter {
				what: "parameter group",
				index,
				count: graph.parameters.len(),
			});
		}
		parameters.push(index);
	}
	graph.parameter_groups.push(ParameterGroup { name, parameters });
	Ok(())
}

pub(crate) fn decode_additional_info_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let unit_type = r.read_u8()?;
	r.skip(3)?;
	state.target.anim_graph_mut(anim_graph::ADDITIONAL_INFO)?.unit_type = Some(unit_type);
	Ok(())
}
