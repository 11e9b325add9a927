use super::constants::{FRAME_SCAN_CHUNK_SIZE, MAX_SAMPLED_FRAME_SIZE};
use super::header::{MpegFrameHeader, VbrHeader};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::{LeadingTagWrapper, find_leading_tag};
use crate::macros::{decode_err, err};
use crate::properties::{DurationEstimate, DurationStrategy, Strategy, first_estimate};
use crate::util::io::{ByteSource, ByteWindow};

// Everything the strategies need to know about the stream
struct MpegStream<'a> {
	source: &'a mut dyn ByteSource,
	options: ParseOptions,
	header: MpegFrameHeader,
	// Leading bytes of the stream, sized by `vbr_search_window`
	leading: ByteWindow,
	// Offset of the first frame
	start: u64,
	// Number of bytes from `start` to the end of the source
	stream_len: u64,
}

/// Estimate the duration of an MPEG audio stream
///
/// The stream must start with a frame sync at offset 0, unless [`ParseOptions::skip_leading_tag_mpeg`]
/// is enabled. The strategies are, in order:
///
/// 1. [`DurationStrategy::VbrFrameCount`]
/// 2. [`DurationStrategy::FrameSampling`]
/// 3. [`DurationStrategy::CbrBitrate`]
///
/// # Errors
///
/// * The source is smaller than 4 bytes ([`ErrorKind::SourceTooSmall`](crate::error::ErrorKind::SourceTooSmall))
/// * The stream doesn't start with a frame sync ([`ErrorKind::StructuralViolation`](crate::error::ErrorKind::StructuralViolation))
/// * No strategy produced a positive duration ([`ErrorKind::DurationIndeterminate`](crate::error::ErrorKind::DurationIndeterminate))
/// * Any I/O error from the underlying source
///
/// # Examples
///
/// ```rust
/// use audioprobe::config::ParseOptions;
/// use audioprobe::properties::DurationStrategy;
/// use std::io::Cursor;
///
/// # fn main() -> audioprobe::error::Result<()> {
/// // A single 128 kbps frame header, followed by silence
/// let mut stream = vec![0xFF, 0xFB, 0x40, 0x00];
/// stream.resize(16_000, 0);
///
/// let estimate = audioprobe::mpeg::estimate_duration(&mut Cursor::new(stream), ParseOptions::new())?;
/// assert_eq!(estimate.strategy(), DurationStrategy::CbrBitrate);
/// assert_eq!(estimate.seconds(), 1.0);
/// # Ok(()) }
/// ```
pub fn estimate_duration(
	source: &mut dyn ByteSource,
	options: ParseOptions,
) -> Result<DurationEstimate> {
	let file_len = source.len()?;
	if file_len < ByteWindow::MIN_LEN as u64 {
		err!(SourceTooSmall);
	}

	let mut start = 0;
	if options.skip_leading_tag_mpeg {
		if let Some(tag) = find_leading_tag(source)? {
			log::debug!(
				"MPEG: Skipping a leading ID3v2 tag, first frame expected at {}",
				tag.container_offset()
			);
			start = tag.container_offset();
		}
	}

	let leading = ByteWindow::read(source, start, options.vbr_search_window)?;

	let bytes = leading.as_bytes();
	let Some(header) = MpegFrameHeader::parse([bytes[0], bytes[1], bytes[2], bytes[3]]) else {
		if start == 0 && LeadingTagWrapper::parse(bytes).is_some() {
			log::warn!("MPEG: Stream starts with an ID3v2 tag, the duration can't be estimated");
		}

		decode_err!(@BAIL Mp3, "File doesn't start with a frame sync");
	};

	log::trace!("MPEG: Leading frame header: {header:?}");

	let mut stream = MpegStream {
		source,
		options,
		header,
		leading,
		start,
		stream_len: file_len - start,
	};

	let chain = [
		Strategy::new(DurationStrategy::VbrFrameCount, vbr_frame_count),
		Strategy::new(DurationStrategy::FrameSampling, frame_sampling),
		Strategy::new(DurationStrategy::CbrBitrate, cbr_bitrate),
	];

	first_estimate(crate::file::AudioFormat::Mp3, &mut stream, &chain)
}

fn vbr_frame_count(stream: &mut MpegStream<'_>) -> Result<Option<f64>> {
	let Some(vbr_header) = VbrHeader::find(stream.leading.as_bytes()) else {
		return Ok(None);
	};

	let Some(sample_rate) = stream.header.sample_rate() else {
		log::debug!("MPEG: Found a {:?} header, but the sample rate is unknown", vbr_header.ty);
		return Ok(None);
	};

	let samples = f64::from(vbr_header.frames) * f64::from(stream.header.samples_per_frame());
	Ok(Some(samples / f64::from(sample_rate)))
}

// Walk the frames from the start of the stream, assuming the bitrate is roughly constant
fn frame_sampling(stream: &mut MpegStream<'_>) -> Result<Option<f64>> {
	let Some(sample_rate) = stream.header.sample_rate() else {
		return Ok(None);
	};

	let scan_end = std::cmp::min(stream.stream_len, stream.options.frame_scan_limit);

	let mut chunk = [0; FRAME_SCAN_CHUNK_SIZE];
	let mut pos = 0_u64;
	let mut frames = 0_u32;

	while pos + 4 < scan_end {
		let to_read = std::cmp::min(FRAME_SCAN_CHUNK_SIZE as u64, scan_end - pos) as usize;
		let read = stream
			.source
			.read_at(stream.start + pos, &mut chunk[..to_read])?;
		if read <= 4 {
			break;
		}

		let bytes = &chunk[..read];
		let next_frame = (0..read - 4).find_map(|i| {
			let header = MpegFrameHeader::parse([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]])?;
			match header.frame_size() {
				Some(size @ 1..=MAX_SAMPLED_FRAME_SIZE) => Some(i as u64 + u64::from(size)),
				_ => None,
			}
		});

		match next_frame {
			Some(advance) => {
				frames += 1;
				pos += advance;
			},
			None => {
				log::trace!("MPEG: No frame found in {read} bytes at {pos}, skipping ahead");
				pos += (read as u64 - 4).max(1);
			},
		}
	}

	log::debug!("MPEG: Sampled {frames} frames over {pos} bytes");

	if frames <= stream.options.min_sampled_frames {
		return Ok(None);
	}

	let average_frame_size = pos as f64 / f64::from(frames);
	let total_frames = stream.stream_len as f64 / average_frame_size;

	Ok(Some(
		total_frames * f64::from(stream.header.samples_per_frame()) / f64::from(sample_rate),
	))
}

fn cbr_bitrate(stream: &mut MpegStream<'_>) -> Result<Option<f64>> {
	let (Some(bitrate), Some(_)) = (stream.header.bitrate(), stream.header.sample_rate()) else {
		log::debug!("MPEG: Bitrate or sample rate unknown, unable to assume CBR");
		return Ok(None);
	};

	log::warn!("MPEG: Using bitrate to estimate duration");

	Ok(Some(
		(stream.stream_len * 8) as f64 / (f64::from(bitrate) * 1000.0),
	))
}
