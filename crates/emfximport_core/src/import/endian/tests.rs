use crate::import::endian::{convert_f32, convert_i16, convert_quat, convert_u16, convert_u32, convert_vec3};
use crate::import::{Endian, Quat, Vec3};

fn foreign() -> Endian {
	match Endian::NATIVE {
		Endian::Little => Endian::Big,
		Endian::Big => Endian::Little,
	}
}

#[test]
fn native_order_is_identity() {
	assert_eq!(convert_u32(0x1122_3344, Endian::NATIVE), 0x1122_3344);
	assert_eq!(convert_u16(0xABCD, Endian::NATIVE), 0xABCD);
	assert_eq!(convert_f32(1.5, Endian::NATIVE), 1.5);
}

#[test]
fn foreign_order_swaps_each_width() {
	assert_eq!(convert_u32(0x1122_3344, foreign()), 0x4433_2211);
	assert_eq!(convert_u16(0xABCD, foreign()), 0xCDAB);
	assert_eq!(convert_i16(0x0102, foreign()), 0x0201);
}

#[test]
fn both_encodings_decode_to_the_same_values() {
	let fixture = Vec3 { x: 1.25, y: -3.5, z: 1024.0 };
	for endian in [Endian::Little, Endian::Big] {
		let mut raw = Vec::new();
		for component in [fixture.x, fixture.y, fixture.z] {
			match endian {
				Endian::Little => raw.extend_from_slice(&component.to_le_bytes()),
				Endian::Big => raw.extend_from_slice(&component.to_be_bytes()),
			}
		}

		let read = |at: usize| f32::from_ne_bytes([raw[at], raw[at + 1], raw[at + 2], raw[at + 3]]);
		let decoded = convert_vec3(Vec3 { x: read(0), y: read(4), z: read(8) }, endian);
		assert_eq!(decoded, fixture, "endian={endian:?}");
	}
}

#[test]
fn quaternion_converts_per_component() {
	let value = Quat { x: 0.5, y: -0.5, z: 0.25, w: 1.0 };
	let swapped = Quat {
		x: f32::from_bits(value.x.to_bits().swap_bytes()),
		y: f32::from_bits(value.y.to_bits().swap_bytes()),
		z: f32::from_bits(value.z.to_bits().swap_bytes()),
		w: f32::from_bits(value.w.to_bits().swap_bytes()),
	};
	assert_eq!(convert_quat(swapped, foreign()), value);
}

#[test]
fn markers_round_through_the_header_byte() {
	assert_eq!(Endian::from_marker(0), Some(Endian::Little));
	assert_eq!(Endian::from_marker(1), Some(Endian::Big));
	assert_eq!(Endian::from_marker(2), None);
	assert_eq!(Endian::Big.marker(), 1);
}
