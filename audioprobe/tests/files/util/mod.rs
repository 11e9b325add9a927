use std::fs::File;
use std::io::{Seek as _, Write as _};

use tempfile::NamedTempFile;

/// A 128 kbps, 44100 Hz, MPEG-1 Layer III frame header (417 byte frames)
pub const MP3_FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x40, 0x00];

/// Create a new temporary file holding `content`
pub fn temp_file(content: &[u8]) -> File {
	let mut file = tempfile::tempfile().unwrap();
	file.write_all(content).unwrap();
	file.rewind().unwrap();

	file
}

/// Create a new named temporary file holding `content`, with the extension `ext`
pub fn named_temp_file(content: &[u8], ext: &str) -> NamedTempFile {
	let mut file = tempfile::Builder::new()
		.suffix(&format!(".{ext}"))
		.tempfile()
		.unwrap();
	file.write_all(content).unwrap();
	file.flush().unwrap();

	file
}

/// An ID3v2.4 header declaring `size` bytes of (zeroed) frames
pub fn id3v2_tag(size: u32) -> Vec<u8> {
	assert!(size < 1 << 28);

	let synchsafe = (size & 0x7F)
		| ((size & (0x7F << 7)) << 1)
		| ((size & (0x7F << 14)) << 2)
		| ((size & (0x7F << 21)) << 3);

	let mut tag = b"ID3\x04\x00\x00".to_vec();
	tag.extend(synchsafe.to_be_bytes());
	tag.resize(10 + size as usize, 0);
	tag
}

/// A CBR MP3 stream of `len` bytes: one frame header followed by silence
pub fn cbr_mp3(len: usize) -> Vec<u8> {
	let mut stream = MP3_FRAME_HEADER.to_vec();
	stream.resize(len, 0);
	stream
}

/// An MP3 stream of `frame_count` back to back 417 byte frames
pub fn framed_mp3(frame_count: usize) -> Vec<u8> {
	let mut stream = Vec::with_capacity(frame_count * 417);
	for _ in 0..frame_count {
		stream.extend(MP3_FRAME_HEADER);
		stream.resize(stream.len() + 413, 0x55);
	}

	stream
}

/// An MP3 stream of `len` bytes, starting with a Xing header declaring `frames` frames
pub fn xing_mp3(frames: u32, len: usize) -> Vec<u8> {
	let mut stream = MP3_FRAME_HEADER.to_vec();
	stream.resize(36, 0);
	stream.extend(b"Xing");
	stream.extend(1_u32.to_be_bytes());
	stream.extend(frames.to_be_bytes());
	stream.resize(len, 0);
	stream
}

/// The fields of a STREAMINFO block that matter for the duration
#[derive(Copy, Clone)]
pub struct FlacParams {
	pub block_type: u8,
	pub min_block_size: u16,
	pub max_block_size: u16,
	pub sample_rate: u32,
	pub channels: u8,
	pub bits_per_sample: u8,
	pub total_samples: u64,
}

impl Default for FlacParams {
	fn default() -> Self {
		Self {
			block_type: 0,
			min_block_size: 4096,
			max_block_size: 4096,
			sample_rate: 44100,
			channels: 2,
			bits_per_sample: 16,
			total_samples: 441_000,
		}
	}
}

/// A FLAC stream with a single STREAMINFO block, padded to `len` bytes
pub fn flac(params: FlacParams, len: usize) -> Vec<u8> {
	let mut stream = b"fLaC".to_vec();
	stream.push(0x80 | params.block_type);
	stream.extend(&18_u32.to_be_bytes()[1..]);

	stream.extend(params.min_block_size.to_be_bytes());
	stream.extend(params.max_block_size.to_be_bytes());
	stream.extend([0; 6]);

	let packed = (u64::from(params.sample_rate) << 44)
		| (u64::from(params.channels - 1) << 41)
		| (u64::from(params.bits_per_sample - 1) << 36)
		| params.total_samples;
	stream.extend(packed.to_be_bytes());

	if stream.len() < len {
		stream.resize(len, 0);
	}

	stream
}

/// An OGG file of `len` bytes, with a Vorbis identification header near the end
pub fn ogg_vorbis(sample_rate: u32, len: usize) -> Vec<u8> {
	let mut file = b"OggS\x00\x02".to_vec();
	file.resize(len - 1024, 0);
	file.extend(b"\x01vorbis\x00\x00\x00");
	file.extend(sample_rate.to_le_bytes());
	file.resize(len, 0);
	file
}
