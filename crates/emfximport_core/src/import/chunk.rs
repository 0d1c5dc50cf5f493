use serde::Serialize;

use crate::import::endian::{convert_color, convert_f32, convert_i16, convert_i32, convert_quat, convert_u16, convert_u32, convert_vec2, convert_vec3, convert_vec4};
use crate::import::{ByteSource, Color, Endian, ImportError, Quat, Result, Vec2, Vec3, Vec4};

/// Index value meaning "no reference".
pub const INVALID_INDEX: u32 = u32::MAX;

/// Chunk identifiers by file kind.
pub mod ids {
	/// Motion event table, shared by every file kind that carries events.
	pub const MOTION_EVENT_TABLE: u32 = 50;

	/// Actor chunk identifiers.
	pub mod actor {
		/// Mesh geometry with vertex layers and sub meshes.
		pub const MESH: u32 = 1;
		/// Per-vertex skinning influences.
		pub const SKINNING_INFO: u32 = 2;
		/// Standard material.
		pub const STD_MATERIAL: u32 = 3;
		/// Texture layer of a standard material.
		pub const STD_MATERIAL_LAYER: u32 = 4;
		/// Node rotation/translation/scale limits.
		pub const LIMIT: u32 = 6;
		/// Actor info block.
		pub const INFO: u32 = 7;
		/// Embedded geometry level of detail.
		pub const MESH_LOD_LEVELS: u32 = 8;
		/// Named node groups.
		pub const NODE_GROUPS: u32 = 10;
		/// Node hierarchy.
		pub const NODES: u32 = 11;
		/// Progressive morph targets.
		pub const STD_PROG_MORPH_TARGETS: u32 = 12;
		/// Material count summary.
		pub const MATERIAL_INFO: u32 = 13;
		/// Attachment node list.
		pub const ATTACHMENT_NODES: u32 = 15;
	}

	/// Skeletal motion chunk identifiers.
	pub mod motion {
		/// Motion info block.
		pub const INFO: u32 = 201;
		/// Keyframed sub motions.
		pub const SUB_MOTIONS: u32 = 202;
		/// Wavelet compression info and chunks.
		pub const WAVELET_INFO: u32 = 203;
	}

	/// Anim graph chunk identifiers.
	pub mod anim_graph {
		/// One graph node.
		pub const NODE: u32 = 400;
		/// State machine transitions.
		pub const STATE_TRANSITIONS: u32 = 401;
		/// Connections into one node.
		pub const NODE_CONNECTIONS: u32 = 402;
		/// Graph parameters.
		pub const PARAMETERS: u32 = 403;
		/// Visual node group.
		pub const NODE_GROUPS: u32 = 404;
		/// Parameter group.
		pub const GROUP_PARAMETERS: u32 = 405;
		/// Extra graph settings.
		pub const ADDITIONAL_INFO: u32 = 407;
	}

	/// Motion set chunk identifiers.
	pub mod motion_set {
		/// One motion set with its entries.
		pub const MOTION_SET: u32 = 500;
	}

	/// Node map chunk identifiers.
	pub mod node_map {
		/// Node name pairs.
		pub const NODE_MAP: u32 = 600;
	}
}

/// Self-describing chunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkHeader {
	/// Chunk identifier.
	pub chunk_id: u32,
	/// Declared payload size in bytes.
	pub size: u32,
	/// Payload layout version.
	pub version: u32,
}

impl ChunkHeader {
	/// Encoded size in bytes.
	pub const SIZE: usize = 12;

	/// Read a header at the current offset.
	///
	/// Returns `None` when fewer than [`Self::SIZE`] bytes remain.
	pub fn read(source: &mut dyn ByteSource, endian: Endian) -> Result<Option<Self>> {
		let mut raw = [0_u8; Self::SIZE];
		if source.read(&mut raw)? < Self::SIZE {
			return Ok(None);
		}

		let field = |at: usize| convert_u32(u32::from_ne_bytes([raw[at], raw[at + 1], raw[at + 2], raw[at + 3]]), endian);
		Ok(Some(Self {
			chunk_id: field(0),
			size: field(4),
			version: field(8),
		}))
	}
}

/// Bounded, endian-aware reader over one chunk payload.
///
/// Every numeric read converts its raw bytes exactly once.
pub struct ChunkReader<'a> {
	source: &'a mut dyn ByteSource,
	endian: Endian,
	header: ChunkHeader,
	start: u64,
}

macro_rules! read_scalar {
	($name:ident, $ty:ty, $convert:ident) => {
		#[doc = concat!("Read a `", stringify!($ty), "`.")]
		pub fn $name(&mut self) -> Result<$ty> {
			let raw = self.array()?;
			Ok($convert(<$ty>::from_ne_bytes(raw), self.endian))
		}
	};
}

impl<'a> ChunkReader<'a> {
	/// Start reading the payload of `header` at the source's current offset.
	pub fn new(source: &'a mut dyn ByteSource, endian: Endian, header: ChunkHeader) -> Self {
		let start = source.position();
		Self {
			source,
			endian,
			header,
			start,
		}
	}

	/// Header of the chunk being read.
	pub fn header(&self) -> ChunkHeader {
		self.header
	}

	/// Byte order of the payload.
	pub fn endian(&self) -> Endian {
		self.endian
	}

	/// Payload bytes consumed so far.
	pub fn consumed(&self) -> u64 {
		self.source.position().saturating_sub(self.start)
	}

	/// Payload bytes left before the declared end.
	pub fn remaining(&self) -> u64 {
		u64::from(self.header.size).saturating_sub(self.consumed())
	}

	fn ensure(&self, need: u64) -> Result<()> {
		let rem = self.remaining();
		if need > rem {
			return Err(ImportError::UnexpectedEof {
				at: self.source.position(),
				need,
				rem,
			});
		}
		Ok(())
	}

	fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
		self.ensure(N as u64)?;
		let mut raw = [0_u8; N];
		self.source.read_exact(&mut raw)?;
		Ok(raw)
	}

	/// Read a single byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.array::<1>()?[0])
	}

	read_scalar!(read_u16, u16, convert_u16);
	read_scalar!(read_i16, i16, convert_i16);
	read_scalar!(read_u32, u32, convert_u32);
	read_scalar!(read_i32, i32, convert_i32);
	read_scalar!(read_f32, f32, convert_f32);

	/// Read a `u32` index, mapping `0xFFFF_FFFF` to `None`.
	pub fn read_index(&mut self) -> Result<Option<u32>> {
		let value = self.read_u32()?;
		Ok((value != INVALID_INDEX).then_some(value))
	}

	fn raw_f32(&mut self) -> Result<f32> {
		Ok(f32::from_ne_bytes(self.array()?))
	}

	/// Read a [`Vec2`].
	pub fn read_vec2(&mut self) -> Result<Vec2> {
		let raw = Vec2 {
			x: self.raw_f32()?,
			y: self.raw_f32()?,
		};
		Ok(convert_vec2(raw, self.endian))
	}

	/// Read a [`Vec3`].
	pub fn read_vec3(&mut self) -> Result<Vec3> {
		let raw = Vec3 {
			x: self.raw_f32()?,
			y: self.raw_f32()?,
			z: self.raw_f32()?,
		};
		Ok(convert_vec3(raw, self.endian))
	}

	/// Read a [`Vec4`].
	pub fn read_vec4(&mut self) -> Result<Vec4> {
		let raw = Vec4 {
			x: self.raw_f32()?,
			y: self.raw_f32()?,
			z: self.raw_f32()?,
			w: self.raw_f32()?,
		};
		Ok(convert_vec4(raw, self.endian))
	}

	/// Read a full-precision [`Quat`].
	pub fn read_quat(&mut self) -> Result<Quat> {
		let raw = Quat {
			x: self.raw_f32()?,
			y: self.raw_f32()?,
			z: self.raw_f32()?,
			w: self.raw_f32()?,
		};
		Ok(convert_quat(raw, self.endian))
	}

	/// Read a 16-bit quantized quaternion and expand it.
	pub fn read_quat16(&mut self) -> Result<Quat> {
		let raw = [self.read_i16()?, self.read_i16()?, self.read_i16()?, self.read_i16()?];
		Ok(Quat::from_quantized(raw))
	}

	/// Read an RGBA [`Color`].
	pub fn read_color(&mut self) -> Result<Color> {
		let raw = Color {
			r: self.raw_f32()?,
			g: self.raw_f32()?,
			b: self.raw_f32()?,
			a: self.raw_f32()?,
		};
		Ok(convert_color(raw, self.endian))
	}

	/// Read `count` raw bytes.
	pub fn read_bytes(&mut self, count: u64) -> Result<Vec<u8>> {
		self.ensure(count)?;
		let mut out = vec![0_u8; count as usize];
		self.source.read_exact(&mut out)?;
		Ok(out)
	}

	/// Read a `u32` length followed by that many bytes.
	pub fn read_blob(&mut self) -> Result<Vec<u8>> {
		let len = self.read_u32()?;
		self.read_bytes(u64::from(len))
	}

	/// Read a length-prefixed string into `scratch`, decoding it lossily as UTF-8.
	pub fn read_string(&mut self, scratch: &mut Vec<u8>) -> Result<String> {
		let len = u64::from(self.read_u32()?);
		self.ensure(len)?;
		scratch.clear();
		scratch.resize(len as usize, 0);
		self.source.read_exact(scratch)?;
		Ok(String::from_utf8_lossy(scratch).into_owned())
	}

	/// Capacity for `count` elements of at least `min_size` bytes each, bounded by the payload left.
	pub fn capacity(&self, count: u32, min_size: u64) -> usize {
		let fits = self.remaining() / min_size.max(1);
		u64::from(count).min(fits) as usize
	}

	/// Skip `count` payload bytes.
	pub fn skip(&mut self, count: u64) -> Result<()> {
		self.ensure(count)?;
		self.source.forward(count)
	}

	/// Skip whatever is left of the payload.
	pub fn skip_rest(&mut self) -> Result<()> {
		let rem = self.remaining();
		self.source.forward(rem)
	}
}
