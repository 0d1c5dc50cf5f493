use std::path::PathBuf;

use emfximport::import::{Asset, Result};

use crate::cmd::util::{emit_json, importer, load_settings};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// JSON file with per-kind import settings.
	#[arg(long)]
	pub settings: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// Decode a file through the matching loader.
pub fn run(args: Args) -> Result<()> {
	let Args { path, settings, json } = args;

	let bundle = load_settings(settings.as_deref())?;
	let asset = importer()?.load_file(&path, &bundle)?;

	if json {
		return emit_json(&asset);
	}

	println!("path: {}", path.display());
	println!("kind: {}", asset.kind());
	match &asset {
		Asset::Actor(actor) => {
			println!("name: {}", actor.name);
			println!("nodes: {}", actor.nodes.len());
			println!("root_nodes: {}", actor.root_nodes.len());
			println!("meshes: {}", actor.meshes.len());
			println!("skins: {}", actor.skins.len());
			println!("materials: {}", actor.materials.len());
			println!("morph_targets: {}", actor.morph_targets.len());
		}
		Asset::SkeletalMotion(motion) => {
			println!("name: {}", motion.name);
			println!("wavelet: {}", motion.is_wavelet);
			println!("sub_motions: {}", motion.sub_motions.len());
			println!("event_tracks: {}", motion.event_table.tracks.len());
			println!("max_time: {}", motion.max_time);
		}
		Asset::MotionSet(tree) => {
			println!("sets: {}", tree.sets.len());
			for set in &tree.sets {
				println!("  {} ({} motions)", set.name, set.entries.len());
			}
		}
		Asset::NodeMap(map) => {
			println!("source_actor: {}", map.source_actor);
			println!("entries: {}", map.entries.len());
		}
		Asset::AnimGraph(graph) => {
			println!("name: {}", graph.name);
			println!("nodes: {}", graph.nodes.len());
			println!("root: {}", graph.root_node().map_or("<none>", |node| node.name.as_str()));
			println!("transitions: {}", graph.transitions.len());
			println!("connections: {}", graph.connections.len());
			println!("parameters: {}", graph.parameters.len());
		}
	}
	Ok(())
}
