use serde::Serialize;

/// Pair of node names mapped onto each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeMapEntry {
	/// Node name in the source actor.
	pub first: String,
	/// Node name in the target actor.
	pub second: String,
}

/// Node name map used for retargeting and mirroring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeMap {
	/// File the map was loaded from.
	pub file_name: Option<String>,
	/// Actor file the map was authored against.
	pub source_actor: String,
	/// Entries announced by the map chunk.
	pub declared_entries: u32,
	/// Loaded entries.
	pub entries: Vec<NodeMapEntry>,
}

impl NodeMap {
	/// Mapped name for `first`.
	pub fn lookup(&self, first: &str) -> Option<&str> {
		self.entries.iter().find(|entry| entry.first == first).map(|entry| entry.second.as_str())
	}
}
