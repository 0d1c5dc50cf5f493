//! Shared test helpers for workspace crates: synthetic asset files and scratch paths.

use std::fs;
use std::path::{Path, PathBuf};

/// Byte order used when encoding synthetic files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
	/// Little-endian, header marker `0`.
	Little,
	/// Big-endian, header marker `1`.
	Big,
}

impl ByteOrder {
	/// Header marker byte.
	pub fn marker(self) -> u8 {
		match self {
			Self::Little => 0,
			Self::Big => 1,
		}
	}
}

/// Encoder for chunk payloads.
pub struct PayloadWriter {
	order: ByteOrder,
	bytes: Vec<u8>,
}

macro_rules! put_number {
	($name:ident, $ty:ty) => {
		#[doc = concat!("Append a `", stringify!($ty), "`.")]
		pub fn $name(&mut self, value: $ty) -> &mut Self {
			match self.order {
				ByteOrder::Little => self.bytes.extend_from_slice(&value.to_le_bytes()),
				ByteOrder::Big => self.bytes.extend_from_slice(&value.to_be_bytes()),
			}
			self
		}
	};
}

impl PayloadWriter {
	/// Create an empty payload.
	pub fn new(order: ByteOrder) -> Self {
		Self { order, bytes: Vec::new() }
	}

	put_number!(u16, u16);
	put_number!(i16, i16);
	put_number!(u32, u32);
	put_number!(i32, i32);
	put_number!(f32, f32);

	/// Append a single byte.
	pub fn u8(&mut self, value: u8) -> &mut Self {
		self.bytes.push(value);
		self
	}

	/// Append `count` zero bytes.
	pub fn pad(&mut self, count: usize) -> &mut Self {
		self.bytes.resize(self.bytes.len() + count, 0);
		self
	}

	/// Append raw bytes verbatim.
	pub fn bytes(&mut self, value: &[u8]) -> &mut Self {
		self.bytes.extend_from_slice(value);
		self
	}

	/// Append a `u32` length followed by the UTF-8 bytes.
	pub fn string(&mut self, value: &str) -> &mut Self {
		self.u32(value.len() as u32);
		self.bytes(value.as_bytes())
	}

	/// Append an optional index, `None` encoded as `0xFFFF_FFFF`.
	pub fn index(&mut self, value: Option<u32>) -> &mut Self {
		self.u32(value.unwrap_or(u32::MAX))
	}

	/// Append consecutive `f32` values.
	pub fn floats(&mut self, values: &[f32]) -> &mut Self {
		for value in values {
			self.f32(*value);
		}
		self
	}

	/// Append a 16-bit quantized quaternion.
	pub fn quat16(&mut self, values: [i16; 4]) -> &mut Self {
		for value in values {
			self.i16(value);
		}
		self
	}

	/// Bytes written so far.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Whether nothing was written yet.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Consume the writer.
	pub fn finish(self) -> Vec<u8> {
		self.bytes
	}
}

/// Builder for a whole asset file: header followed by chunks.
pub struct AssetFileBuilder {
	order: ByteOrder,
	bytes: Vec<u8>,
}

impl AssetFileBuilder {
	fn with_header(order: ByteOrder, magic: &[u8; 4], mul_order: Option<u8>) -> Self {
		let mut bytes = magic.to_vec();
		bytes.extend_from_slice(&[1, 0, order.marker()]);
		if let Some(value) = mul_order {
			bytes.push(value);
		}
		Self { order, bytes }
	}

	/// Actor file (`ACTR`).
	pub fn actor(order: ByteOrder) -> Self {
		Self::with_header(order, b"ACTR", Some(0))
	}

	/// Keyframed skeletal motion file (`MOT `).
	pub fn motion(order: ByteOrder) -> Self {
		Self::with_header(order, b"MOT ", Some(0))
	}

	/// Wavelet skeletal motion file (`MOTW`).
	pub fn wavelet_motion(order: ByteOrder) -> Self {
		Self::with_header(order, b"MOTW", Some(0))
	}

	/// Motion set file (`MOS `).
	pub fn motion_set(order: ByteOrder) -> Self {
		Self::with_header(order, b"MOS ", None)
	}

	/// Node map file (`NOMP`).
	pub fn node_map(order: ByteOrder) -> Self {
		Self::with_header(order, b"NOMP", None)
	}

	/// Anim graph file (`ANGR`) with the given node count and name.
	pub fn anim_graph(order: ByteOrder, num_nodes: u32, name: &str) -> Self {
		let mut header = PayloadWriter::new(order);
		header.bytes(b"ANGR").u8(order.marker());
		header.u32(1).u32(num_nodes).u32(0).u32(0).u32(0);
		header.string(name);
		for _ in 0..5 {
			header.string("");
		}
		Self {
			order,
			bytes: header.finish(),
		}
	}

	/// Start from arbitrary header bytes.
	pub fn raw_header(order: ByteOrder, header: &[u8]) -> Self {
		Self {
			order,
			bytes: header.to_vec(),
		}
	}

	/// Append a chunk whose size is taken from the written payload.
	pub fn chunk(self, id: u32, version: u32, write: impl FnOnce(&mut PayloadWriter)) -> Self {
		let mut payload = PayloadWriter::new(self.order);
		write(&mut payload);
		let payload = payload.finish();
		let size = payload.len() as u32;
		self.raw_chunk(id, version, size, &payload)
	}

	/// Append a chunk header with an explicit declared size and payload.
	pub fn raw_chunk(mut self, id: u32, version: u32, declared_size: u32, payload: &[u8]) -> Self {
		let mut header = PayloadWriter::new(self.order);
		header.u32(id).u32(declared_size).u32(version);
		self.bytes.extend_from_slice(&header.finish());
		self.bytes.extend_from_slice(payload);
		self
	}

	/// Append bytes outside any chunk.
	pub fn trailing(mut self, bytes: &[u8]) -> Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// Byte offset where the next chunk would start.
	pub fn offset(&self) -> usize {
		self.bytes.len()
	}

	/// Consume the builder.
	pub fn finish(self) -> Vec<u8> {
		self.bytes
	}
}

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Write `bytes` to a scratch file under the target directory and return its path.
pub fn write_scratch(name: &str, bytes: &[u8]) -> PathBuf {
	let dir = target_dir().join("emfximport-scratch");
	fs::create_dir_all(&dir).expect("scratch dir is creatable");
	let path = dir.join(name);
	fs::write(&path, bytes).expect("scratch file is writable");
	path
}
