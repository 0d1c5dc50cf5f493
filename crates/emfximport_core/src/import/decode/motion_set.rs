use crate::import::asset::{MotionEntry, MotionSet};
use crate::import::ids::motion_set;
use crate::import::{ChunkReader, ImportError, ImportState, Result};

/// One motion set and its entries, appended to the shared set table.
pub(crate) fn decode_motion_set_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	state.target.motion_set_mut(motion_set::MOTION_SET)?;

	let parent = r.read_index()?;
	let num_entries = r.read_u32()?;
	let name = state.shared.read_string(r)?;

	let mut entries = Vec::with_capacity(r.capacity(num_entries, 8));
	for _ in 0..num_entries {
		let file_name = state.shared.read_string(r)?;
		let id = state.shared.read_string(r)?;
		entries.push(MotionEntry { file_name, id });
	}

	let table = state.shared.motion_sets()?;
	let index = table.sets.len();
	let parent = match parent {
		Some(parent) if (parent as usize) < index => Some(parent as usize),
		Some(parent) => {
			return Err(ImportError::DanglingMotionSet {
				name,
				parent,
				count: index,
			});
		}
		None => None,
	};

	if let Some(parent) = parent {
		table.sets[parent].children.push(index);
	}
	table.sets.push(MotionSet {
		name,
		parent,
		children: Vec::new(),
		entries,
	});
	Ok(())
}
