use serde::Serialize;

/// Motion referenced by a motion set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MotionEntry {
	/// Motion file name.
	pub file_name: String,
	/// Identifier used by anim graphs.
	pub id: String,
}

/// Motion set with its position in the set hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MotionSet {
	/// Set name.
	pub name: String,
	/// Parent set index in [`MotionSetTree::sets`].
	pub parent: Option<usize>,
	/// Child set indices.
	pub children: Vec<usize>,
	/// Motions in file order.
	pub entries: Vec<MotionEntry>,
}

impl MotionSet {
	/// Entry with the given identifier.
	pub fn entry(&self, id: &str) -> Option<&MotionEntry> {
		self.entries.iter().find(|entry| entry.id == id)
	}
}

/// Every set decoded from one motion set file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MotionSetTree {
	/// File the sets were loaded from.
	pub file_name: Option<String>,
	/// Sets are owned by the runtime rather than the caller.
	pub owned_by_runtime: bool,
	/// Sets in file order; the first one is the root.
	pub sets: Vec<MotionSet>,
}

impl MotionSetTree {
	/// Root set, the first one in file order.
	pub fn root(&self) -> Option<&MotionSet> {
		self.sets.first()
	}

	/// Set with the given name.
	pub fn find(&self, name: &str) -> Option<&MotionSet> {
		self.sets.iter().find(|set| set.name == name)
	}
}
