use serde::Serialize;

use crate::import::context::PendingConnection;
use crate::import::{GraphCounts, GraphInfo, ImportError, Result};

/// Node of an anim graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
	/// Node name.
	pub name: String,
	/// Runtime node type identifier.
	pub type_id: u32,
	/// Node data layout version.
	pub node_version: u32,
	/// Containing node; `None` for the root state machine.
	pub parent: Option<u32>,
	/// Contained nodes, filled when the import finishes.
	pub children: Vec<u32>,
	/// Editor position.
	pub visual_pos: (i32, i32),
	/// Editor color.
	pub color: u32,
	/// Raw node flags.
	pub flags: u8,
	/// Serialized attribute values, interpreted by the runtime node type.
	#[serde(skip)]
	pub attributes: Vec<u8>,
}

/// State machine transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateTransition {
	/// Owning state machine.
	pub state_machine: u32,
	/// Source state; `None` for a wildcard transition.
	pub source: Option<u32>,
	/// Target state.
	pub target: u32,
	/// Runtime transition type identifier.
	pub type_id: u32,
	/// Raw flags.
	pub flags: u8,
	/// Serialized attribute values.
	#[serde(skip)]
	pub attributes: Vec<u8>,
}

/// Port-to-port connection between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphConnection {
	/// Node providing the value.
	pub source_node: u32,
	/// Output port.
	pub source_port: u16,
	/// Node receiving the value.
	pub target_node: u32,
	/// Input port.
	pub target_port: u16,
}

/// Graph parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphParameter {
	/// Parameter name.
	pub name: String,
	/// Description shown in tools.
	pub description: String,
	/// Value type identifier.
	pub value_type: u32,
	/// Raw flags.
	pub flags: u32,
	/// Serialized default value.
	#[serde(skip)]
	pub default_value: Vec<u8>,
}

/// Visual group of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNodeGroup {
	/// Group name.
	pub name: String,
	/// Group color.
	pub color: u32,
	/// Group visible in tools.
	pub visible: bool,
	/// Member nodes.
	pub nodes: Vec<u32>,
}

/// Named group of parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterGroup {
	/// Group name.
	pub name: String,
	/// Member parameters.
	pub parameters: Vec<u32>,
}

/// Anim graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnimGraph {
	/// Graph name.
	pub name: String,
	/// File the graph was loaded from.
	pub file_name: Option<String>,
	/// Descriptive strings from the file header.
	pub info: GraphInfo,
	/// Element counts declared by the file header.
	pub declared: GraphCounts,
	/// Nodes in file order.
	pub nodes: Vec<GraphNode>,
	/// Root state machine.
	pub root: Option<u32>,
	/// State transitions.
	pub transitions: Vec<StateTransition>,
	/// Node connections.
	pub connections: Vec<GraphConnection>,
	/// Parameters.
	pub parameters: Vec<GraphParameter>,
	/// Node groups.
	pub node_groups: Vec<GraphNodeGroup>,
	/// Parameter groups.
	pub parameter_groups: Vec<ParameterGroup>,
	/// Unit type from the additional info chunk.
	pub unit_type: Option<u8>,
}

impl AnimGraph {
	/// Root state machine node.
	pub fn root_node(&self) -> Option<&GraphNode> {
		self.root.and_then(|index| self.nodes.get(index as usize))
	}

	/// Node with the given name.
	pub fn find_node(&self, name: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|node| node.name == name)
	}

	pub(crate) fn check_node(&self, what: &'static str, index: u32) -> Result<()> {
		if (index as usize) < self.nodes.len() {
			return Ok(());
		}
		Err(ImportError::DanglingGraphNode {
			what,
			index,
			count: self.nodes.len(),
		})
	}

	/// Resolve deferred connections, link children and pick the root state machine.
	pub(crate) fn finish(&mut self, pending: &[PendingConnection]) -> Result<()> {
		for connection in pending {
			self.check_node("connection target", connection.target_node)?;
			self.check_node("connection source", connection.source_node)?;
			self.connections.push(GraphConnection {
				source_node: connection.source_node,
				source_port: connection.source_port,
				target_node: connection.target_node,
				target_port: connection.target_port,
			});
		}

		for node in &mut self.nodes {
			node.children.clear();
		}
		for index in 0..self.nodes.len() {
			if let Some(parent) = self.nodes[index].parent {
				self.nodes[parent as usize].children.push(index as u32);
			}
		}

		let root = self.nodes.iter().position(|node| node.parent.is_none()).ok_or(ImportError::MissingRootStateMachine)?;
		self.root = Some(root as u32);
		Ok(())
	}
}
