use std::fmt;

use serde::Serialize;

use crate::import::endian::convert_u32;
use crate::import::{ByteSource, Endian, ImportError, Result};

/// Structural kind of an asset file, identified by its leading magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
	/// Skeletal actor (`ACTR`).
	Actor,
	/// Skeletal motion with key tracks (`MOT `).
	SkeletalMotion,
	/// Wavelet-compressed skeletal motion (`MOTW`).
	WaveletSkeletalMotion,
	/// Legacy motion set (`MOS `).
	MotionSet,
	/// Node name map (`NOMP`).
	NodeMap,
	/// Legacy anim graph (`ANGR`).
	AnimGraph,
	/// None of the supported magics matched.
	Unknown,
}

impl FileKind {
	/// Probe order used by [`classify`].
	pub const PROBE_ORDER: [Self; 5] = [Self::Actor, Self::SkeletalMotion, Self::MotionSet, Self::NodeMap, Self::AnimGraph];

	/// Leading four-byte magic, if the kind has one.
	pub fn magic(self) -> Option<[u8; 4]> {
		match self {
			Self::Actor => Some(*b"ACTR"),
			Self::SkeletalMotion => Some(*b"MOT "),
			Self::WaveletSkeletalMotion => Some(*b"MOTW"),
			Self::MotionSet => Some(*b"MOS "),
			Self::NodeMap => Some(*b"NOMP"),
			Self::AnimGraph => Some(*b"ANGR"),
			Self::Unknown => None,
		}
	}

	/// Stable snake_case label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Actor => "actor",
			Self::SkeletalMotion => "skeletal_motion",
			Self::WaveletSkeletalMotion => "wavelet_skeletal_motion",
			Self::MotionSet => "motion_set",
			Self::NodeMap => "node_map",
			Self::AnimGraph => "anim_graph",
			Self::Unknown => "unknown",
		}
	}

	/// Whether both kinds are read by the same loader.
	pub fn same_loader(self, other: Self) -> bool {
		self.family() == other.family()
	}

	fn family(self) -> Self {
		match self {
			Self::WaveletSkeletalMotion => Self::SkeletalMotion,
			other => other,
		}
	}

	fn header_size(self) -> usize {
		match self {
			Self::Actor | Self::SkeletalMotion | Self::WaveletSkeletalMotion => 8,
			Self::MotionSet | Self::NodeMap => 7,
			Self::AnimGraph => 25,
			Self::Unknown => 4,
		}
	}
}

impl fmt::Display for FileKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Element counts stored in the anim graph header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphCounts {
	/// Anim graph file version.
	pub file_version: u32,
	/// Declared number of nodes.
	pub num_nodes: u32,
	/// Declared number of state transitions.
	pub num_state_transitions: u32,
	/// Declared number of node connections.
	pub num_node_connections: u32,
	/// Declared number of parameters.
	pub num_parameters: u32,
}

/// Parsed fixed-size file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileHeader {
	/// Kind selected by the magic.
	pub kind: FileKind,
	/// Byte order of every field after the marker.
	pub endian: Endian,
	/// Exporter high version (zero for anim graphs).
	pub hi_version: u8,
	/// Exporter low version (zero for anim graphs).
	pub lo_version: u8,
	/// Matrix multiplication order byte (actors and motions only).
	pub mul_order: Option<u8>,
	/// Anim graph element counts.
	pub graph: Option<GraphCounts>,
}

impl FileHeader {
	/// Read and verify the header of an `expected` file at the current offset.
	///
	/// A skeletal motion request accepts both the keyframed and wavelet magic.
	pub fn read(source: &mut dyn ByteSource, expected: FileKind) -> Result<Self> {
		let mut magic = [0_u8; 4];
		source.read_exact(&mut magic)?;
		let kind = match match_magic(magic) {
			Some(found) if found.same_loader(expected) => found,
			Some(found) => return Err(ImportError::WrongFileKind { expected, found }),
			None => return Err(ImportError::UnknownMagic { expected, magic }),
		};

		let mut rest = vec![0_u8; kind.header_size() - magic.len()];
		source.read_exact(&mut rest)?;

		if kind == FileKind::AnimGraph {
			let endian = parse_marker(kind, rest[0])?;
			let field = |at: usize| convert_u32(u32::from_ne_bytes([rest[at], rest[at + 1], rest[at + 2], rest[at + 3]]), endian);
			return Ok(Self {
				kind,
				endian,
				hi_version: 0,
				lo_version: 0,
				mul_order: None,
				graph: Some(GraphCounts {
					file_version: field(1),
					num_nodes: field(5),
					num_state_transitions: field(9),
					num_node_connections: field(13),
					num_parameters: field(17),
				}),
			});
		}

		let endian = parse_marker(kind, rest[2])?;
		Ok(Self {
			kind,
			endian,
			hi_version: rest[0],
			lo_version: rest[1],
			mul_order: rest.get(3).copied(),
			graph: None,
		})
	}

	/// Encoded header size in bytes.
	pub fn size(&self) -> usize {
		self.kind.header_size()
	}
}

/// Descriptive strings that follow the anim graph header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphInfo {
	/// Graph name.
	pub name: String,
	/// Copyright notice.
	pub copyright: String,
	/// Free-form description.
	pub description: String,
	/// Company name.
	pub company: String,
	/// Runtime version string.
	pub runtime_version: String,
	/// Editor build string.
	pub editor_build: String,
}

impl GraphInfo {
	/// Read the six length-prefixed strings in file order.
	pub fn read(source: &mut dyn ByteSource, endian: Endian) -> Result<Self> {
		let mut next = || read_prefixed_string(&mut *source, endian);
		Ok(Self {
			name: next()?,
			copyright: next()?,
			description: next()?,
			company: next()?,
			runtime_version: next()?,
			editor_build: next()?,
		})
	}
}

/// Classify a stream by probing each kind's header at offset 0.
///
/// Leaves the source rewound to offset 0 whatever the outcome.
pub fn classify(source: &mut dyn ByteSource) -> Result<FileKind> {
	for kind in FileKind::PROBE_ORDER {
		source.seek(0)?;
		match FileHeader::read(source, kind) {
			Ok(header) => {
				source.seek(0)?;
				return Ok(header.kind);
			}
			Err(ImportError::Io(err)) => {
				source.seek(0)?;
				return Err(ImportError::Io(err));
			}
			Err(_) => {}
		}
	}

	source.seek(0)?;
	Ok(FileKind::Unknown)
}

/// Kind named by the magic at the current offset, leaving the offset unchanged.
///
/// Returns `None` for an unknown magic or fewer than four remaining bytes.
pub(crate) fn peek_magic(source: &mut dyn ByteSource) -> Result<Option<FileKind>> {
	let at = source.position();
	let mut magic = [0_u8; 4];
	let read = source.read(&mut magic)?;
	source.seek(at)?;
	Ok(if read == magic.len() { match_magic(magic) } else { None })
}

fn match_magic(magic: [u8; 4]) -> Option<FileKind> {
	[
		FileKind::Actor,
		FileKind::SkeletalMotion,
		FileKind::WaveletSkeletalMotion,
		FileKind::MotionSet,
		FileKind::NodeMap,
		FileKind::AnimGraph,
	]
	.into_iter()
	.find(|kind| kind.magic() == Some(magic))
}

fn parse_marker(kind: FileKind, marker: u8) -> Result<Endian> {
	Endian::from_marker(marker).ok_or(ImportError::InvalidEndianMarker { kind, marker })
}

fn read_prefixed_string(source: &mut dyn ByteSource, endian: Endian) -> Result<String> {
	let mut len = [0_u8; 4];
	source.read_exact(&mut len)?;
	let len = u64::from(convert_u32(u32::from_ne_bytes(len), endian));
	if len > source.remaining() {
		return Err(ImportError::UnexpectedEof {
			at: source.position(),
			need: len,
			rem: source.remaining(),
		});
	}

	let mut bytes = vec![0_u8; len as usize];
	source.read_exact(&mut bytes)?;
	Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests;
