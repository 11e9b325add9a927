use byteorder::{BigEndian, ByteOrder};

pub(crate) const BLOCK_ID_STREAMINFO: u8 = 0;
pub(crate) const BLOCK_HEADER_SIZE: usize = 4;
pub(crate) const STREAMINFO_SIZE: usize = 18;

/// A FLAC metadata block header
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct BlockHeader {
	pub(crate) last: bool,
	pub(crate) ty: u8,
	pub(crate) size: u32,
}

impl BlockHeader {
	pub(crate) fn parse(bytes: [u8; BLOCK_HEADER_SIZE]) -> Self {
		let header = Self {
			last: bytes[0] & 0x80 != 0,
			ty: bytes[0] & 0x7F,
			size: BigEndian::read_u24(&bytes[1..]),
		};

		log::trace!(
			"FLAC: Block header, type: {}, size: {}, last: {}",
			header.ty,
			header.size,
			header.last
		);

		header
	}
}

/// The contents of a FLAC STREAMINFO block
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct StreamInfo {
	/// The minimum block size (in samples)
	pub min_block_size: u16,
	/// The maximum block size (in samples)
	pub max_block_size: u16,
	/// The minimum frame size (in bytes), 0 if unknown
	pub min_frame_size: u32,
	/// The maximum frame size (in bytes), 0 if unknown
	pub max_frame_size: u32,
	/// Sample rate (Hz)
	pub sample_rate: u32,
	/// Channel count
	pub channels: u8,
	/// Bits per sample
	pub bits_per_sample: u8,
	/// Total samples per channel, 0 if unknown
	pub total_samples: u64,
}

impl StreamInfo {
	/// Decode an 18 byte STREAMINFO block
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::flac::StreamInfo;
	///
	/// let block = [
	/// 	0x10, 0x00, 0x10, 0x00, // Block sizes
	/// 	0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // Frame sizes
	/// 	0x0A, 0xC4, 0x42, 0xF0, 0x00, 0x06, 0xBA, 0xA8, // Packed stream parameters
	/// ];
	///
	/// let info = StreamInfo::parse(&block);
	/// assert_eq!(info.sample_rate, 44100);
	/// assert_eq!(info.channels, 2);
	/// assert_eq!(info.bits_per_sample, 16);
	/// assert_eq!(info.total_samples, 441_000);
	/// ```
	pub fn parse(bytes: &[u8; STREAMINFO_SIZE]) -> Self {
		// Sample rate (20 bits)
		// Number of channels - 1 (3 bits)
		// Bits per sample - 1 (5 bits)
		// Total samples (36 bits)
		let packed = BigEndian::read_u64(&bytes[10..]);

		Self {
			min_block_size: BigEndian::read_u16(&bytes[..2]),
			max_block_size: BigEndian::read_u16(&bytes[2..4]),
			min_frame_size: BigEndian::read_u24(&bytes[4..7]),
			max_frame_size: BigEndian::read_u24(&bytes[7..10]),
			sample_rate: (packed >> 44) as u32,
			channels: ((packed >> 41) & 0b111) as u8 + 1,
			bits_per_sample: ((packed >> 36) & 0b1_1111) as u8 + 1,
			total_samples: packed & 0xF_FFFF_FFFF,
		}
	}
}
