//! Leading ID3v2 tag handling
//!
//! Audio containers are frequently preceded by an ID3v2 tag. The tag itself is opaque here:
//! the only thing of interest is where it ends, so the real container signature can be found.

use crate::error::Result;
use crate::util::io::{ByteSource, ByteWindow};
use crate::util::synchsafe::SynchsafeInteger;

use byteorder::{BigEndian, ByteOrder};

/// The size of an ID3v2 header
pub const ID3V2_HEADER_SIZE: u64 = 10;

/// An ID3v2 tag occupying `[0, container_offset)` at the start of a source
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LeadingTagWrapper {
	size: u32,
}

impl LeadingTagWrapper {
	/// Attempt to parse a tag header from the start of `bytes`
	///
	/// This only verifies the `ID3` marker. The version and flags are not inspected.
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::id3::LeadingTagWrapper;
	///
	/// // A tag holding 257 bytes of frames, synchsafe encoded
	/// let header = b"ID3\x04\x00\x00\x00\x00\x02\x01";
	///
	/// let wrapper = LeadingTagWrapper::parse(header).unwrap();
	/// assert_eq!(wrapper.size(), 257);
	/// assert_eq!(wrapper.container_offset(), 267);
	///
	/// assert!(LeadingTagWrapper::parse(b"fLaC\0\0\0\x22\0\0").is_none());
	/// ```
	pub fn parse(bytes: &[u8]) -> Option<Self> {
		if bytes.len() < ID3V2_HEADER_SIZE as usize || !bytes.starts_with(b"ID3") {
			return None;
		}

		let size = BigEndian::read_u32(&bytes[6..10]).unsynch();
		log::trace!("ID3v2: Found a leading tag, size: {size}");

		Some(Self { size })
	}

	/// The size of the tag content, excluding the 10 byte header
	pub fn size(&self) -> u32 {
		self.size
	}

	/// The offset of the first byte following the tag
	///
	/// Footers and extended headers are not accounted for, the tag is assumed to be
	/// `10 + size` bytes long.
	pub fn container_offset(&self) -> u64 {
		ID3V2_HEADER_SIZE + u64::from(self.size)
	}
}

/// Look for a leading ID3v2 tag at offset 0 of `source`
///
/// # Errors
///
/// * Fewer than 4 bytes are available
/// * Any I/O error from the underlying source
pub(crate) fn find_leading_tag<S>(source: &mut S) -> Result<Option<LeadingTagWrapper>>
where
	S: ByteSource + ?Sized,
{
	let window = ByteWindow::read(source, 0, ID3V2_HEADER_SIZE as usize)?;
	Ok(LeadingTagWrapper::parse(window.as_bytes()))
}
