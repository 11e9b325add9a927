//! Random-access reads over file-like objects

use crate::error::Result;
use crate::macros::err;

use std::io::{Cursor, Read, Seek, SeekFrom};

/// A source that can be read at arbitrary offsets
///
/// This is implemented for every `Read + Seek` type, so [`File`](std::fs::File),
/// [`BufReader`](std::io::BufReader) and [`Cursor`] all work out of the box.
///
/// Reading never changes the observable stream position: it is restored once the read is done.
///
/// # Examples
///
/// ```rust
/// use audioprobe::io::ByteSource;
/// use std::io::Cursor;
///
/// # fn main() -> std::io::Result<()> {
/// let mut source = Cursor::new(vec![1, 2, 3, 4, 5]);
///
/// let mut buf = [0; 4];
/// let read = source.read_at(3, &mut buf)?;
///
/// // Only 2 bytes remain past offset 3
/// assert_eq!(read, 2);
/// assert_eq!(&buf[..read], &[4, 5]);
/// assert_eq!(source.len()?, 5);
/// # Ok(()) }
/// ```
pub trait ByteSource {
	/// Read up to `buf.len()` bytes starting at `offset`, returning the number of bytes read
	///
	/// Reading past the end of the source is not an error, it will simply return fewer bytes.
	///
	/// # Errors
	///
	/// Any I/O error from the underlying source
	fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> std::io::Result<usize>;

	/// The total length of the source in bytes
	///
	/// # Errors
	///
	/// Any I/O error from the underlying source
	fn len(&mut self) -> std::io::Result<u64>;
}

impl<T> ByteSource for T
where
	T: Read + Seek,
{
	fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
		let current_pos = self.stream_position()?;
		self.seek(SeekFrom::Start(offset))?;

		let read = std::io::copy(
			&mut self.by_ref().take(buf.len() as u64),
			&mut Cursor::new(&mut buf[..]),
		);

		self.seek(SeekFrom::Start(current_pos))?;
		Ok(read? as usize)
	}

	fn len(&mut self) -> std::io::Result<u64> {
		let current_pos = self.stream_position()?;
		let len = self.seek(SeekFrom::End(0))?;

		self.seek(SeekFrom::Start(current_pos))?;

		Ok(len)
	}
}

/// An owned, read-only slice of a [`ByteSource`]
///
/// A window remembers the absolute offset it was read from, and may be shorter than requested
/// when the source ends early.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteWindow {
	offset: u64,
	bytes: Vec<u8>,
}

impl ByteWindow {
	/// The fewest bytes a window may hold
	pub const MIN_LEN: usize = 4;

	/// Read a window of (up to) `len` bytes at `offset`
	///
	/// # Errors
	///
	/// * Fewer than [`ByteWindow::MIN_LEN`] bytes are available at `offset` ([`ErrorKind::SourceTooSmall`](crate::error::ErrorKind::SourceTooSmall))
	/// * Any I/O error from the underlying source
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::io::ByteWindow;
	/// use std::io::Cursor;
	///
	/// # fn main() -> audioprobe::error::Result<()> {
	/// let mut source = Cursor::new(b"fLaC\0\0\0\x22".to_vec());
	///
	/// // Asking for more than is available truncates the window
	/// let window = ByteWindow::read(&mut source, 0, 4096)?;
	/// assert_eq!(window.len(), 8);
	/// assert!(window.starts_with(b"fLaC"));
	///
	/// // But there has to be *something* to look at
	/// assert!(ByteWindow::read(&mut source, 6, 4096).is_err());
	/// # Ok(()) }
	/// ```
	pub fn read<S>(source: &mut S, offset: u64, len: usize) -> Result<Self>
	where
		S: ByteSource + ?Sized,
	{
		let available = source.len()?.saturating_sub(offset);
		let len = std::cmp::min(len as u64, available) as usize;

		if len < Self::MIN_LEN {
			log::trace!("Window at offset {offset} only has {len} bytes available");
			err!(SourceTooSmall);
		}

		let mut bytes = vec![0; len];
		let read = source.read_at(offset, &mut bytes)?;
		if read < Self::MIN_LEN {
			err!(SourceTooSmall);
		}

		bytes.truncate(read);
		Ok(Self { offset, bytes })
	}

	/// The absolute offset this window was read from
	pub fn offset(&self) -> u64 {
		self.offset
	}

	/// The number of bytes in the window
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Whether the window is empty
	///
	/// This is only possible for windows constructed by hand.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// The window's content
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Whether the window starts with `prefix`
	pub fn starts_with(&self, prefix: &[u8]) -> bool {
		self.bytes.starts_with(prefix)
	}

	/// Find the first occurrence of `needle`, relative to the start of the window
	pub fn find(&self, needle: &[u8]) -> Option<usize> {
		find_subslice(&self.bytes, needle)
	}

	/// Find the last occurrence of `needle`, relative to the start of the window
	pub fn rfind(&self, needle: &[u8]) -> Option<usize> {
		rfind_subslice(&self.bytes, needle)
	}
}

impl From<Vec<u8>> for ByteWindow {
	fn from(bytes: Vec<u8>) -> Self {
		Self { offset: 0, bytes }
	}
}

pub(crate) fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	if needle.is_empty() || needle.len() > haystack.len() {
		return None;
	}

	haystack.windows(needle.len()).position(|w| w == needle)
}

pub(crate) fn rfind_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	if needle.is_empty() || needle.len() > haystack.len() {
		return None;
	}

	haystack.windows(needle.len()).rposition(|w| w == needle)
}
