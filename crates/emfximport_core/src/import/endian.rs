//! Byte-order conversion for raw fields read from asset payloads.
//!
//! Readers fetch multi-byte fields in native order and pass them through one of
//! the `convert_*` functions exactly once, naming the order the file was written in.

use serde::Serialize;

use crate::import::{Color, Quat, Vec2, Vec3, Vec4};

/// Byte order of an asset payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
	/// Little-endian (`0` marker).
	Little,
	/// Big-endian (`1` marker).
	Big,
}

impl Endian {
	/// Byte order of the running machine.
	#[cfg(target_endian = "little")]
	pub const NATIVE: Self = Self::Little;
	/// Byte order of the running machine.
	#[cfg(target_endian = "big")]
	pub const NATIVE: Self = Self::Big;

	/// Decode a header endianness byte.
	pub fn from_marker(marker: u8) -> Option<Self> {
		match marker {
			0 => Some(Self::Little),
			1 => Some(Self::Big),
			_ => None,
		}
	}

	/// Header byte written for this order.
	pub fn marker(self) -> u8 {
		match self {
			Self::Little => 0,
			Self::Big => 1,
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Little => "little",
			Self::Big => "big",
		}
	}

	fn is_native(self) -> bool {
		self == Self::NATIVE
	}
}

/// Convert a `u16` written in `source` order.
pub fn convert_u16(value: u16, source: Endian) -> u16 {
	if source.is_native() { value } else { value.swap_bytes() }
}

/// Convert an `i16` written in `source` order.
pub fn convert_i16(value: i16, source: Endian) -> i16 {
	if source.is_native() { value } else { value.swap_bytes() }
}

/// Convert a `u32` written in `source` order.
pub fn convert_u32(value: u32, source: Endian) -> u32 {
	if source.is_native() { value } else { value.swap_bytes() }
}

/// Convert an `i32` written in `source` order.
pub fn convert_i32(value: i32, source: Endian) -> i32 {
	if source.is_native() { value } else { value.swap_bytes() }
}

/// Convert an `f32` written in `source` order.
pub fn convert_f32(value: f32, source: Endian) -> f32 {
	f32::from_bits(convert_u32(value.to_bits(), source))
}

/// Convert each component of a [`Vec2`].
pub fn convert_vec2(value: Vec2, source: Endian) -> Vec2 {
	Vec2 {
		x: convert_f32(value.x, source),
		y: convert_f32(value.y, source),
	}
}

/// Convert each component of a [`Vec3`].
pub fn convert_vec3(value: Vec3, source: Endian) -> Vec3 {
	Vec3 {
		x: convert_f32(value.x, source),
		y: convert_f32(value.y, source),
		z: convert_f32(value.z, source),
	}
}

/// Convert each component of a [`Vec4`].
pub fn convert_vec4(value: Vec4, source: Endian) -> Vec4 {
	Vec4 {
		x: convert_f32(value.x, source),
		y: convert_f32(value.y, source),
		z: convert_f32(value.z, source),
		w: convert_f32(value.w, source),
	}
}

/// Convert each component of a [`Quat`].
pub fn convert_quat(value: Quat, source: Endian) -> Quat {
	Quat {
		x: convert_f32(value.x, source),
		y: convert_f32(value.y, source),
		z: convert_f32(value.z, source),
		w: convert_f32(value.w, source),
	}
}

/// Convert each channel of a [`Color`].
pub fn convert_color(value: Color, source: Endian) -> Color {
	Color {
		r: convert_f32(value.r, source),
		g: convert_f32(value.g, source),
		b: convert_f32(value.b, source),
		a: convert_f32(value.a, source),
	}
}

#[cfg(test)]
mod tests;
