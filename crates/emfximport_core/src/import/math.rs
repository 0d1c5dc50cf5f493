use serde::Serialize;

/// Two-component float vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vec2 {
	/// X component.
	pub x: f32,
	/// Y component.
	pub y: f32,
}

/// Three-component float vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vec3 {
	/// X component.
	pub x: f32,
	/// Y component.
	pub y: f32,
	/// Z component.
	pub z: f32,
}

/// Four-component float vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vec4 {
	/// X component.
	pub x: f32,
	/// Y component.
	pub y: f32,
	/// Z component.
	pub z: f32,
	/// W component.
	pub w: f32,
}

/// Rotation quaternion in `x, y, z, w` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quat {
	/// X component.
	pub x: f32,
	/// Y component.
	pub y: f32,
	/// Z component.
	pub z: f32,
	/// W component.
	pub w: f32,
}

impl Quat {
	/// Identity rotation.
	pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

	/// Expand a 16-bit quantized quaternion.
	pub fn from_quantized(raw: [i16; 4]) -> Self {
		let scale = 1.0 / f32::from(i16::MAX);
		Self {
			x: f32::from(raw[0]) * scale,
			y: f32::from(raw[1]) * scale,
			z: f32::from(raw[2]) * scale,
			w: f32::from(raw[3]) * scale,
		}
	}
}

impl Default for Quat {
	fn default() -> Self {
		Self::IDENTITY
	}
}

/// Linear RGBA color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Color {
	/// Red channel.
	pub r: f32,
	/// Green channel.
	pub g: f32,
	/// Blue channel.
	pub b: f32,
	/// Alpha channel.
	pub a: f32,
}
