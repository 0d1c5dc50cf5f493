//! Per-import auxiliary state shared between chunks.
//!
//! Every import builds a fresh [`SharedData`] from the bootstrap list and drops it
//! on every exit path. Dropping resets each entry before releasing it.

use std::any::Any;
use std::fmt;

use crate::import::asset::MotionSet;
use crate::import::{ChunkReader, ImportError, Result};

/// Tag identifying one shared context entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
	/// Scratch buffer for length-prefixed strings.
	Strings,
	/// Anim graph node references awaiting resolution.
	GraphNodes,
	/// Motion sets accumulated in file order.
	MotionSets,
}

impl ContextKind {
	/// Stable label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Strings => "strings",
			Self::GraphNodes => "graph_nodes",
			Self::MotionSets => "motion_sets",
		}
	}
}

impl fmt::Display for ContextKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One entry of the shared decode context.
pub trait SharedEntry: Any {
	/// Tag this entry is stored under.
	fn kind(&self) -> ContextKind;

	/// Drop any accumulated state.
	fn reset(&mut self);

	/// Downcasting hook.
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Reusable byte buffer for string decoding.
#[derive(Debug, Default)]
pub struct StringScratch {
	/// Raw bytes of the most recent string.
	pub buffer: Vec<u8>,
	/// Strings decoded during this import.
	pub strings_read: usize,
}

impl SharedEntry for StringScratch {
	fn kind(&self) -> ContextKind {
		ContextKind::Strings
	}

	fn reset(&mut self) {
		self.buffer = Vec::new();
		self.strings_read = 0;
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// Connection whose source node is resolved after all nodes are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingConnection {
	/// Node receiving the connection.
	pub target_node: u32,
	/// Node providing the value.
	pub source_node: u32,
	/// Output port on the source node.
	pub source_port: u16,
	/// Input port on the target node.
	pub target_port: u16,
}

/// Deferred anim graph node references.
#[derive(Debug, Default)]
pub struct GraphNodeTable {
	/// Node count declared by the file header.
	pub declared_nodes: u32,
	/// Connections collected from connection chunks.
	pub pending_connections: Vec<PendingConnection>,
}

impl SharedEntry for GraphNodeTable {
	fn kind(&self) -> ContextKind {
		ContextKind::GraphNodes
	}

	fn reset(&mut self) {
		self.declared_nodes = 0;
		self.pending_connections = Vec::new();
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// Motion sets in file order, assembled into a tree when the import finishes.
#[derive(Debug, Default)]
pub struct MotionSetTable {
	/// Decoded sets; parents always precede their children.
	pub sets: Vec<MotionSet>,
}

impl SharedEntry for MotionSetTable {
	fn kind(&self) -> ContextKind {
		ContextKind::MotionSets
	}

	fn reset(&mut self) {
		self.sets = Vec::new();
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// Owned map from context tag to entry, scoped to one import.
pub struct SharedData {
	entries: Vec<Box<dyn SharedEntry>>,
}

impl SharedData {
	/// Build the context with every bootstrap entry.
	pub fn bootstrap() -> Self {
		let mut shared = Self { entries: Vec::new() };
		shared.insert(Box::new(StringScratch::default()));
		shared.insert(Box::new(GraphNodeTable::default()));
		shared.insert(Box::new(MotionSetTable::default()));
		shared
	}

	/// Insert `entry`, replacing any entry with the same tag.
	pub fn insert(&mut self, entry: Box<dyn SharedEntry>) {
		let kind = entry.kind();
		self.entries.retain(|existing| existing.kind() != kind);
		self.entries.push(entry);
	}

	/// Whether an entry with `kind` exists.
	pub fn contains(&self, kind: ContextKind) -> bool {
		self.entries.iter().any(|entry| entry.kind() == kind)
	}

	/// Typed access to the entry stored under `kind`.
	pub fn get_mut<T: SharedEntry>(&mut self, kind: ContextKind) -> Result<&mut T> {
		self.entries
			.iter_mut()
			.find(|entry| entry.kind() == kind)
			.and_then(|entry| entry.as_any_mut().downcast_mut::<T>())
			.ok_or(ImportError::MissingContext { kind: kind.as_str() })
	}

	/// String decoding scratch.
	pub fn strings(&mut self) -> Result<&mut StringScratch> {
		self.get_mut(ContextKind::Strings)
	}

	/// Read a length-prefixed string through the shared scratch buffer.
	pub fn read_string(&mut self, reader: &mut ChunkReader<'_>) -> Result<String> {
		let strings = self.strings()?;
		let value = reader.read_string(&mut strings.buffer)?;
		strings.strings_read += 1;
		Ok(value)
	}

	/// Deferred anim graph references.
	pub fn graph_nodes(&mut self) -> Result<&mut GraphNodeTable> {
		self.get_mut(ContextKind::GraphNodes)
	}

	/// Accumulated motion sets.
	pub fn motion_sets(&mut self) -> Result<&mut MotionSetTable> {
		self.get_mut(ContextKind::MotionSets)
	}

	/// Reset every entry in place.
	pub fn reset(&mut self) {
		for entry in &mut self.entries {
			entry.reset();
		}
	}
}

impl Drop for SharedData {
	fn drop(&mut self) {
		self.reset();
		log::trace!("released {} shared context entries", self.entries.len());
	}
}

#[cfg(test)]
mod tests;
