use std::io::Cursor;

use crate::import::{ByteSource, ImportError, ReaderSource, SliceSource};

#[test]
fn slice_source_reads_short_at_end() {
	let bytes = [1_u8, 2, 3];
	let mut source = SliceSource::new(&bytes);
	let mut buf = [0_u8; 4];

	let read = source.read(&mut buf).expect("read succeeds");
	assert_eq!(read, 3);
	assert_eq!(&buf[..3], &bytes);
	assert!(source.is_eof());
}

#[test]
fn forward_stops_at_end_of_data() {
	let bytes = [0_u8; 8];
	let mut source = SliceSource::new(&bytes);
	source.forward(5).expect("forward succeeds");
	assert_eq!(source.position(), 5);
	source.forward(100).expect("forward clamps");
	assert_eq!(source.position(), 8);
	assert!(source.is_eof());
}

#[test]
fn read_exact_reports_offset_and_remaining() {
	let bytes = [0_u8; 6];
	let mut source = SliceSource::new(&bytes);
	source.seek(4).expect("seek succeeds");

	let mut buf = [0_u8; 4];
	let err = source.read_exact(&mut buf).expect_err("short read fails");
	assert!(matches!(err, ImportError::UnexpectedEof { at: 4, need: 4, rem: 2 }));
}

#[test]
fn reader_source_matches_slice_source() {
	let bytes: Vec<u8> = (0..32).collect();
	let mut reader = ReaderSource::new(Cursor::new(bytes.clone())).expect("reader source opens");
	let mut slice = SliceSource::new(&bytes);

	assert_eq!(reader.length(), 32);
	reader.forward(10).expect("reader forward");
	slice.forward(10).expect("slice forward");

	let mut left = [0_u8; 6];
	let mut right = [0_u8; 6];
	reader.read_exact(&mut left).expect("reader read");
	slice.read_exact(&mut right).expect("slice read");
	assert_eq!(left, right);
	assert_eq!(reader.position(), slice.position());

	reader.seek(0).expect("reader rewinds");
	assert_eq!(reader.position(), 0);
	assert!(!reader.is_eof());
}
