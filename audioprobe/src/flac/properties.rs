use super::block::{
	BLOCK_HEADER_SIZE, BLOCK_ID_STREAMINFO, BlockHeader, STREAMINFO_SIZE, StreamInfo,
};
use crate::error::Result;
use crate::file::AudioFormat;
use crate::id3::find_leading_tag;
use crate::macros::{decode_err, err};
use crate::properties::{DurationEstimate, DurationStrategy, Strategy, first_estimate};
use crate::util::io::{ByteSource, ByteWindow};

// Marker, block header, and STREAMINFO
const HEADER_LEN: usize = 4 + BLOCK_HEADER_SIZE + STREAMINFO_SIZE;

struct FlacStream {
	info: StreamInfo,
	file_len: u64,
}

/// Read the STREAMINFO block of a FLAC stream, skipping a leading ID3v2 tag if present
///
/// # Errors
///
/// * The source is smaller than 4 bytes ([`ErrorKind::SourceTooSmall`](crate::error::ErrorKind::SourceTooSmall))
/// * The stream is missing its `fLaC` marker, the first block isn't a valid STREAMINFO,
///   or the declared sample rate is 0 ([`ErrorKind::StructuralViolation`](crate::error::ErrorKind::StructuralViolation))
/// * Any I/O error from the underlying source
pub fn read_stream_info(source: &mut dyn ByteSource) -> Result<StreamInfo> {
	let file_len = source.len()?;
	if file_len < ByteWindow::MIN_LEN as u64 {
		err!(SourceTooSmall);
	}

	let stream_start = match find_leading_tag(source)? {
		Some(tag) => {
			log::debug!(
				"FLAC: Skipping a leading ID3v2 tag, stream expected at {}",
				tag.container_offset()
			);
			tag.container_offset()
		},
		None => 0,
	};

	if stream_start.saturating_add(4) > file_len {
		decode_err!(@BAIL Flac, "Leading ID3v2 tag extends past the end of the file");
	}

	let window = ByteWindow::read(source, stream_start, HEADER_LEN)?;
	if !window.starts_with(b"fLaC") {
		decode_err!(@BAIL Flac, "File missing \"fLaC\" stream marker");
	}

	let Some(bytes) = window.as_bytes().get(..HEADER_LEN) else {
		decode_err!(@BAIL Flac, "File is too small to contain a STREAMINFO block");
	};

	let block_header = BlockHeader::parse([bytes[4], bytes[5], bytes[6], bytes[7]]);
	if block_header.ty != BLOCK_ID_STREAMINFO {
		decode_err!(@BAIL Flac, "STREAMINFO block is not the first block");
	}

	if (block_header.size as usize) < STREAMINFO_SIZE {
		decode_err!(@BAIL Flac, "STREAMINFO block is too small");
	}

	let mut stream_info = [0; STREAMINFO_SIZE];
	stream_info.copy_from_slice(&bytes[4 + BLOCK_HEADER_SIZE..]);

	let info = StreamInfo::parse(&stream_info);
	log::debug!(
		"FLAC: STREAMINFO declares {} samples at {} Hz",
		info.total_samples,
		info.sample_rate
	);

	if info.sample_rate == 0 {
		decode_err!(@BAIL Flac, "Could not determine the sample rate");
	}

	Ok(info)
}

/// Estimate the duration of a FLAC stream
///
/// The strategies are, in order:
///
/// 1. [`DurationStrategy::ExactSampleCount`]
/// 2. [`DurationStrategy::BlockSizeHeuristic`]
/// 3. [`DurationStrategy::PcmEquivalent`]
///
/// # Errors
///
/// * See [`read_stream_info`]
/// * No strategy produced a positive duration ([`ErrorKind::DurationIndeterminate`](crate::error::ErrorKind::DurationIndeterminate))
///
/// # Examples
///
/// ```rust
/// use audioprobe::properties::DurationStrategy;
/// use std::io::Cursor;
///
/// # fn main() -> audioprobe::error::Result<()> {
/// let mut stream = b"fLaC".to_vec();
/// stream.extend([0x80, 0x00, 0x00, 0x12]);
/// stream.extend([0x10, 0x00, 0x10, 0x00, 0, 0, 0, 0, 0, 0]);
/// stream.extend([0x0A, 0xC4, 0x42, 0xF0, 0x00, 0x06, 0xBA, 0xA8]);
///
/// let estimate = audioprobe::flac::estimate_duration(&mut Cursor::new(stream))?;
/// assert_eq!(estimate.strategy(), DurationStrategy::ExactSampleCount);
/// assert_eq!(estimate.seconds(), 10.0);
/// # Ok(()) }
/// ```
pub fn estimate_duration(source: &mut dyn ByteSource) -> Result<DurationEstimate> {
	let info = read_stream_info(source)?;
	let mut stream = FlacStream {
		info,
		file_len: source.len()?,
	};

	let chain = [
		Strategy::new(DurationStrategy::ExactSampleCount, exact_sample_count),
		Strategy::new(DurationStrategy::BlockSizeHeuristic, block_size_heuristic),
		Strategy::new(DurationStrategy::PcmEquivalent, pcm_equivalent),
	];

	first_estimate(AudioFormat::Flac, &mut stream, &chain)
}

fn exact_sample_count(stream: &mut FlacStream) -> Result<Option<f64>> {
	if stream.info.total_samples == 0 {
		return Ok(None);
	}

	Ok(Some(
		stream.info.total_samples as f64 / f64::from(stream.info.sample_rate),
	))
}

fn block_size_heuristic(stream: &mut FlacStream) -> Result<Option<f64>> {
	let StreamInfo {
		min_block_size,
		max_block_size,
		sample_rate,
		..
	} = stream.info;

	if min_block_size == 0 || max_block_size == 0 {
		return Ok(None);
	}

	log::warn!("FLAC: Total sample count unknown, estimating from the block size");

	let average_block_size = (f64::from(min_block_size) + f64::from(max_block_size)) / 2.0;
	let estimated_blocks = stream.file_len as f64 / average_block_size;

	Ok(Some(
		estimated_blocks * f64::from(max_block_size) / f64::from(sample_rate),
	))
}

fn pcm_equivalent(stream: &mut FlacStream) -> Result<Option<f64>> {
	let StreamInfo {
		sample_rate,
		channels,
		bits_per_sample,
		..
	} = stream.info;

	log::warn!("FLAC: Treating the stream as raw PCM to estimate the duration");

	let bits_per_second =
		f64::from(sample_rate) * f64::from(channels) * f64::from(bits_per_sample);
	Ok(Some((stream.file_len * 8) as f64 / bits_per_second))
}
