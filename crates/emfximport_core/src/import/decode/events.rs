use crate::import::asset::{EventTrack, MotionEvent};
use crate::import::ids;
use crate::import::{ChunkReader, ImportError, ImportState, Result};

/// Motion event table: tracks with their own type and parameter string tables.
pub(crate) fn decode_event_table_v1(r: &mut ChunkReader<'_>, state: &mut ImportState) -> Result<()> {
	let num_tracks = r.read_u32()?;
	let mut tracks = Vec::with_capacity(r.capacity(num_tracks, 20));

	for _ in 0..num_tracks {
		let num_events = r.read_u32()?;
		let num_type_strings = r.read_u32()?;
		let num_param_strings = r.read_u32()?;
		let enabled = r.read_u8()? != 0;
		r.skip(3)?;
		let name = state.shared.read_string(r)?;

		let mut type_strings = Vec::with_capacity(r.capacity(num_type_strings, 4));
		for _ in 0..num_type_strings {
			type_strings.push(state.shared.read_string(r)?);
		}
		let mut param_strings = Vec::with_capacity(r.capacity(num_param_strings, 4));
		for _ in 0..num_param_strings {
			param_strings.push(state.shared.read_string(r)?);
		}

		let mut events = Vec::with_capacity(r.capacity(num_events, 16));
		for _ in 0..num_events {
			let start_time = r.read_f32()?;
			let end_time = r.read_f32()?;
			let type_index = r.read_u32()?;
			let param_index = r.read_u16()?;
			r.skip(2)?;

			let event_type = lookup(&type_strings, "event type", type_index)?;
			let parameters = lookup(&param_strings, "event parameter", u32::from(param_index))?;
			events.push(MotionEvent {
				start_time,
				end_time,
				event_type,
				parameters,
			});
		}

		tracks.push(EventTrack { name, enabled, events });
	}

	state.target.motion_mut(ids::MOTION_EVENT_TABLE)?.event_table.tracks.extend(tracks);
	Ok(())
}

fn lookup(table: &[String], what: &'static str, index: u32) -> Result<String> {
	table.get(index as usize).cloned().ok_or(ImportError::DanglingStringIndex {
		what,
		index,
		count: table.len(),
	})
}
