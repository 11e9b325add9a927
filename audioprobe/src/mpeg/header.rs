use super::constants::{
	BITRATES, MPEG1_SAMPLES_PER_FRAME, MPEG2_SAMPLES_PER_FRAME, SAMPLE_RATES,
	VBRI_FRAME_COUNT_OFFSET, XING_FRAME_COUNT_OFFSET,
};

use byteorder::{BigEndian, ByteOrder};

pub(crate) fn verify_frame_sync(frame_sync: [u8; 2]) -> bool {
	frame_sync[0] == 0xFF && frame_sync[1] >> 5 == 0b111
}

/// MPEG Audio version
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[allow(missing_docs)]
pub enum MpegVersion {
	V1,
	V2,
	V2_5,
	Reserved,
}

/// MPEG layer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Layer {
	Layer1,
	Layer2,
	Layer3,
	Reserved,
}

/// A decoded 4-byte MPEG audio frame header
///
/// Only the frame sync is verified on construction. The derived values (bitrate, sample rate, frame size)
/// are only available for MPEG-1 Layer III frames, anything else resolves to `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MpegFrameHeader {
	version: MpegVersion,
	layer: Layer,
	bitrate_index: u8,
	sample_rate_index: u8,
	padding: bool,
}

impl MpegFrameHeader {
	/// Decode a frame header
	///
	/// Returns `None` if the first 11 bits aren't set.
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::mpeg::{Layer, MpegFrameHeader, MpegVersion};
	///
	/// let header = MpegFrameHeader::parse([0xFF, 0xFB, 0x40, 0x00]).unwrap();
	/// assert_eq!(header.version(), MpegVersion::V1);
	/// assert_eq!(header.layer(), Layer::Layer3);
	/// assert_eq!(header.bitrate(), Some(128));
	/// assert_eq!(header.sample_rate(), Some(44100));
	/// assert_eq!(header.samples_per_frame(), 1152);
	///
	/// assert!(MpegFrameHeader::parse([0x49, 0x44, 0x33, 0x04]).is_none());
	/// ```
	pub fn parse(bytes: [u8; 4]) -> Option<Self> {
		if !verify_frame_sync([bytes[0], bytes[1]]) {
			return None;
		}

		let version = match (bytes[1] >> 3) & 0b11 {
			0b00 => MpegVersion::V2_5,
			0b10 => MpegVersion::V2,
			0b11 => MpegVersion::V1,
			_ => MpegVersion::Reserved,
		};

		let layer = match (bytes[1] >> 1) & 0b11 {
			0b01 => Layer::Layer3,
			0b10 => Layer::Layer2,
			0b11 => Layer::Layer1,
			_ => Layer::Reserved,
		};

		Some(Self {
			version,
			layer,
			bitrate_index: bytes[2] >> 4,
			sample_rate_index: (bytes[2] >> 2) & 0b11,
			padding: (bytes[2] >> 1) & 1 == 1,
		})
	}

	/// The MPEG version
	pub fn version(&self) -> MpegVersion {
		self.version
	}

	/// The MPEG layer
	pub fn layer(&self) -> Layer {
		self.layer
	}

	/// The raw 4-bit bitrate index
	pub fn bitrate_index(&self) -> u8 {
		self.bitrate_index
	}

	/// The raw 2-bit sample rate index
	pub fn sample_rate_index(&self) -> u8 {
		self.sample_rate_index
	}

	/// Whether the frame carries a padding byte
	pub fn has_padding(&self) -> bool {
		self.padding
	}

	/// The bitrate (kbps)
	///
	/// This is only known for MPEG-1 Layer III with a non-reserved index.
	pub fn bitrate(&self) -> Option<u32> {
		if self.version != MpegVersion::V1 || self.layer != Layer::Layer3 {
			return None;
		}

		match BITRATES[usize::from(self.bitrate_index)] {
			0 => None,
			bitrate => Some(bitrate),
		}
	}

	/// The sample rate (Hz)
	///
	/// MPEG-2.5 is not supported, and will always resolve to `None`.
	pub fn sample_rate(&self) -> Option<u32> {
		let column = match self.version {
			MpegVersion::V1 => 0,
			MpegVersion::V2 => 1,
			_ => return None,
		};

		match SAMPLE_RATES[usize::from(self.sample_rate_index)][column] {
			0 => None,
			sample_rate => Some(sample_rate),
		}
	}

	/// The number of samples in a frame
	///
	/// This is 1152 for MPEG-1 and 576 for everything else.
	pub fn samples_per_frame(&self) -> u32 {
		match self.version {
			MpegVersion::V1 => MPEG1_SAMPLES_PER_FRAME,
			_ => MPEG2_SAMPLES_PER_FRAME,
		}
	}

	/// The size of the frame in bytes, including the header
	pub fn frame_size(&self) -> Option<u32> {
		let bitrate = self.bitrate()?;
		let sample_rate = self.sample_rate()?;

		let padding = u32::from(self.padding);
		Some((self.samples_per_frame() / 8) * bitrate * 1000 / sample_rate + padding)
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum VbrHeaderType {
	Xing,
	Info,
	Vbri,
}

/// A Xing/Info/VBRI header found in the leading frames
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct VbrHeader {
	pub(crate) ty: VbrHeaderType,
	pub(crate) frames: u32,
}

impl VbrHeader {
	/// Search `buf` for the first VBR header declaring a non-zero frame count
	///
	/// The Xing flags aren't checked, the frame count is always read from its fixed position.
	pub(crate) fn find(buf: &[u8]) -> Option<Self> {
		for (pos, token) in buf.windows(4).enumerate() {
			let (ty, frame_count_offset) = match token {
				b"Xing" => (VbrHeaderType::Xing, XING_FRAME_COUNT_OFFSET),
				b"Info" => (VbrHeaderType::Info, XING_FRAME_COUNT_OFFSET),
				b"VBRI" => (VbrHeaderType::Vbri, VBRI_FRAME_COUNT_OFFSET),
				_ => continue,
			};

			let start = pos + frame_count_offset;
			let Some(frame_count) = buf.get(start..start + 4) else {
				log::debug!("MPEG: {ty:?} header at {pos} is truncated");
				continue;
			};

			let frames = BigEndian::read_u32(frame_count);
			if frames == 0 {
				log::debug!("MPEG: {ty:?} header at {pos} declares 0 frames, skipping");
				continue;
			}

			log::debug!("MPEG: Found a {ty:?} header at {pos}, frames: {frames}");
			return Some(Self { ty, frames });
		}

		None
	}
}
