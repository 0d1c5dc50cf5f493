use std::io::{Read, Seek, SeekFrom};

use crate::import::{ImportError, Result};

/// Seekable byte stream with a known length.
///
/// Imports own their source exclusively for the duration of a call.
pub trait ByteSource {
	/// Read up to `buf.len()` bytes; a short count only happens at the end of data.
	fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

	/// Move to an absolute offset.
	fn seek(&mut self, offset: u64) -> Result<()>;

	/// Skip `count` bytes without reading them, stopping at the end of data.
	fn forward(&mut self, count: u64) -> Result<()>;

	/// Current absolute offset.
	fn position(&self) -> u64;

	/// Total length in bytes.
	fn length(&self) -> u64;

	/// Whether no bytes remain.
	fn is_eof(&self) -> bool {
		self.position() >= self.length()
	}

	/// Bytes between the current offset and the end.
	fn remaining(&self) -> u64 {
		self.length().saturating_sub(self.position())
	}

	/// Fill `buf` completely or fail without a partial result.
	fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
		let at = self.position();
		let rem = self.remaining();
		let read = self.read(buf)?;
		if read < buf.len() {
			return Err(ImportError::UnexpectedEof {
				at,
				need: buf.len() as u64,
				rem,
			});
		}
		Ok(())
	}
}

/// Byte source over a borrowed memory buffer.
pub struct SliceSource<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> SliceSource<'a> {
	/// Create a source positioned at offset 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	fn clamp(&self, offset: u64) -> usize {
		usize::try_from(offset).map_or(self.bytes.len(), |value| value.min(self.bytes.len()))
	}
}

impl ByteSource for SliceSource<'_> {
	fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
		let available = &self.bytes[self.pos..];
		let count = buf.len().min(available.len());
		buf[..count].copy_from_slice(&available[..count]);
		self.pos += count;
		Ok(count)
	}

	fn seek(&mut self, offset: u64) -> Result<()> {
		self.pos = self.clamp(offset);
		Ok(())
	}

	fn forward(&mut self, count: u64) -> Result<()> {
		self.pos = self.clamp((self.pos as u64).saturating_add(count));
		Ok(())
	}

	fn position(&self) -> u64 {
		self.pos as u64
	}

	fn length(&self) -> u64 {
		self.bytes.len() as u64
	}
}

/// Byte source over any seekable reader, such as an open file.
pub struct ReaderSource<R> {
	inner: R,
	pos: u64,
	len: u64,
}

impl<R: Read + Seek> ReaderSource<R> {
	/// Wrap `inner`, measuring its length and rewinding to offset 0.
	pub fn new(mut inner: R) -> Result<Self> {
		let len = inner.seek(SeekFrom::End(0))?;
		inner.seek(SeekFrom::Start(0))?;
		Ok(Self { inner, pos: 0, len })
	}

	/// Release the wrapped reader.
	pub fn into_inner(self) -> R {
		self.inner
	}
}

impl<R: Read + Seek> ByteSource for ReaderSource<R> {
	fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
		let mut filled = 0;
		while filled < buf.len() {
			match self.inner.read(&mut buf[filled..]) {
				Ok(0) => break,
				Ok(count) => filled += count,
				Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
				Err(err) => return Err(err.into()),
			}
		}
		self.pos += filled as u64;
		Ok(filled)
	}

	fn seek(&mut self, offset: u64) -> Result<()> {
		let target = offset.min(self.len);
		self.inner.seek(SeekFrom::Start(target))?;
		self.pos = target;
		Ok(())
	}

	fn forward(&mut self, count: u64) -> Result<()> {
		self.seek(self.pos.saturating_add(count))
	}

	fn position(&self) -> u64 {
		self.pos
	}

	fn length(&self) -> u64 {
		self.len
	}
}

#[cfg(test)]
mod tests;
