use thiserror::Error;

use crate::import::FileKind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ImportError>;

/// Errors produced while classifying, dispatching and decoding asset files.
#[derive(Debug, Error)]
pub enum ImportError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Leading magic does not belong to the requested file kind.
	#[error("unexpected magic {magic:?}, expected {expected}")]
	UnknownMagic {
		/// File kind the caller asked for.
		expected: FileKind,
		/// First four bytes of the stream.
		magic: [u8; 4],
	},
	/// Stream holds a different supported file kind.
	#[error("stream is a {found} file, expected {expected}")]
	WrongFileKind {
		/// File kind the caller asked for.
		expected: FileKind,
		/// File kind reported by the sniffer.
		found: FileKind,
	},
	/// Header endianness byte is neither `0` nor `1`.
	#[error("invalid endian marker {marker} in {kind} header")]
	InvalidEndianMarker {
		/// File kind whose header was read.
		kind: FileKind,
		/// Raw marker byte.
		marker: u8,
	},
	/// Payload is not in the chunked legacy format.
	#[error("{expected} payload is not in the legacy chunk format")]
	NotLegacyFormat {
		/// File kind the caller asked for.
		expected: FileKind,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Stream offset where the read was attempted.
		at: u64,
		/// Requested bytes.
		need: u64,
		/// Bytes still available.
		rem: u64,
	},
	/// Chunk declares more payload bytes than the file holds.
	#[error("chunk {chunk_id} at offset {at} declares {size} bytes, remaining {rem}")]
	ChunkOutOfRange {
		/// Offset of the chunk header.
		at: u64,
		/// Chunk identifier.
		chunk_id: u32,
		/// Declared payload size.
		size: u32,
		/// Bytes left after the header.
		rem: u64,
	},
	/// Two decoder units claim the same chunk id and version.
	#[error("duplicate decoder for chunk {chunk_id} version {version}")]
	DuplicateDecoder {
		/// Chunk identifier.
		chunk_id: u32,
		/// Chunk version.
		version: u32,
	},
	/// Registered decoder ran against a destination it does not populate.
	#[error("chunk {chunk_id} cannot be applied to a {kind} import")]
	ChunkOutsideTarget {
		/// Chunk identifier.
		chunk_id: u32,
		/// Kind of the destination being built.
		kind: FileKind,
	},
	/// Shared decode context entry was not bootstrapped for this import.
	#[error("shared decode context entry {kind} is missing")]
	MissingContext {
		/// Context tag that was requested.
		kind: &'static str,
	},
	/// Node index does not name a node decoded earlier in the file.
	#[error("{what} references node {index}, but only {count} nodes are known")]
	DanglingNodeIndex {
		/// Structure holding the reference.
		what: &'static str,
		/// Offending index.
		index: u32,
		/// Number of nodes decoded so far.
		count: usize,
	},
	/// Material index does not name a decoded material.
	#[error("{what} references material {index}, but only {count} materials are known")]
	DanglingMaterialIndex {
		/// Structure holding the reference.
		what: &'static str,
		/// Offending index.
		index: u32,
		/// Number of materials decoded so far.
		count: usize,
	},
	/// Skinning data refers to a node without a matching mesh.
	#[error("skinning for node {node} has no matching mesh (collision={collision})")]
	DanglingMeshReference {
		/// Node the skinning chunk targets.
		node: u32,
		/// Whether the collision mesh was requested.
		collision: bool,
	},
	/// Anim graph reference to an undeclared node.
	#[error("{what} references graph node {index}, but only {count} nodes are known")]
	DanglingGraphNode {
		/// Structure holding the reference.
		what: &'static str,
		/// Offending index.
		index: u32,
		/// Number of graph nodes decoded.
		count: usize,
	},
	/// Anim graph reference to an undeclared parameter.
	#[error("{what} references parameter {index}, but only {count} parameters are known")]
	DanglingParameter {
		/// Structure holding the reference.
		what: &'static str,
		/// Offending index.
		index: u32,
		/// Number of parameters decoded.
		count: usize,
	},
	/// Index into a per-chunk string table is out of range.
	#[error("{what} string index {index} out of range (table size {count})")]
	DanglingStringIndex {
		/// Table being indexed.
		what: &'static str,
		/// Offending index.
		index: u32,
		/// Table length.
		count: usize,
	},
	/// Motion set names a parent set that has not been decoded.
	#[error("motion set {name:?} references parent set {parent}, but only {count} sets are known")]
	DanglingMotionSet {
		/// Name of the child set.
		name: String,
		/// Offending parent index.
		parent: u32,
		/// Number of sets decoded so far.
		count: usize,
	},
	/// Vertex layer attribute size disagrees with its layer type.
	#[error("vertex layer type {layer_type} declares attribute size {size}, expected {expected}")]
	InvalidLayerSize {
		/// Layer type identifier.
		layer_type: u32,
		/// Declared attribute size in bytes.
		size: u32,
		/// Attribute size implied by the layer type.
		expected: u32,
	},
	/// Motion set file contained no motion set chunk.
	#[error("motion set file contains no motion set chunk")]
	MissingMotionSet,
	/// Anim graph file contained no parentless node.
	#[error("anim graph has no root state machine")]
	MissingRootStateMachine,
	/// Settings file is not a valid settings bundle.
	#[error("invalid settings file {path}: {detail}")]
	InvalidSettings {
		/// Path of the settings file.
		path: String,
		/// Parser message with line and column.
		detail: String,
	},
	/// Value could not be rendered as JSON.
	#[error("json output failed: {detail}")]
	JsonOutput {
		/// Serializer message.
		detail: String,
	},
}
