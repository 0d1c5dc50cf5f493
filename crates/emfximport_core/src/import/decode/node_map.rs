use log::debug;

use crate::import::asset::NodeMapEntry;
use crate::import::ids::node_map;
use crate::import::{ChunkReader, ImportState, Result};

/// Node name pairs. With node loading off only the header fields are kept.
pub(crate) fn decode_node_map_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let num_entries = r.read_u32()?;
	let source_actor = state.shared.read_string(r)?;
	let load_nodes = state.settings.node_map(node_map::NODE_MAP)?.load_nodes;

	let map = state.target.node_map_mut(node_map::NODE_MAP)?;
	map.source_actor = source_actor;
	map.declared_entries = num_entries;

	if !load_nodes {
		debug!("node loading disabled, skipping {num_entries} entries");
		return r.skip_rest();
	}

	let mut entries = Vec::with_capacity(r.capacity(num_entries, 8));
	for _ in 0..num_entries {
		let first = state.shared.read_string(r)?;
		let second = state.shared.read_string(r)?;
		entries.push(NodeMapEntry { first, second });
	}
	state.target.node_map_mut(node_map::NODE_MAP)?.entries.extend(entries);
	Ok(())
}
