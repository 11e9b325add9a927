use super::constants::{NOMINAL_BITS_PER_SAMPLE, SAMPLE_RATE_OFFSET, VORBIS_TOKEN};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::file::AudioFormat;
use crate::macros::err;
use crate::properties::{DurationEstimate, DurationStrategy, Strategy, first_estimate};
use crate::util::io::{ByteSource, ByteWindow, rfind_subslice};

use byteorder::{ByteOrder, LittleEndian};

struct OggTail {
	tail: ByteWindow,
	file_len: u64,
}

/// Estimate the duration of an OGG file
///
/// This is the least reliable of the estimators. The end of the file is searched for a
/// Vorbis header to recover the sample rate, and the whole file is then assumed to be
/// 16-bit audio at that rate.
///
/// The source isn't verified to actually be OGG.
///
/// # Errors
///
/// * The source is smaller than 4 bytes ([`ErrorKind::SourceTooSmall`](crate::error::ErrorKind::SourceTooSmall))
/// * No sample rate could be found ([`ErrorKind::DurationIndeterminate`](crate::error::ErrorKind::DurationIndeterminate))
/// * Any I/O error from the underlying source
pub fn estimate_duration(
	source: &mut dyn ByteSource,
	options: ParseOptions,
) -> Result<DurationEstimate> {
	let file_len = source.len()?;
	if file_len < ByteWindow::MIN_LEN as u64 {
		err!(SourceTooSmall);
	}

	let tail_start = file_len.saturating_sub(options.tail_window as u64);
	let tail = ByteWindow::read(source, tail_start, options.tail_window)?;

	let mut stream = OggTail { tail, file_len };
	let chain = [Strategy::new(
		DurationStrategy::TailHeuristic,
		tail_heuristic,
	)];

	first_estimate(AudioFormat::Ogg, &mut stream, &chain)
}

fn tail_heuristic(stream: &mut OggTail) -> Result<Option<f64>> {
	let Some(sample_rate) = find_sample_rate(&stream.tail) else {
		log::debug!("OGG: No Vorbis header found in the last {} bytes", stream.tail.len());
		return Ok(None);
	};

	log::warn!("OGG: Assuming {NOMINAL_BITS_PER_SAMPLE}-bit audio at {sample_rate} Hz");

	let bits_per_second = f64::from(sample_rate) * f64::from(NOMINAL_BITS_PER_SAMPLE);
	Ok(Some((stream.file_len * 8) as f64 / bits_per_second))
}

// Search backwards for a `vorbis` token followed by a non-zero sample rate
pub(crate) fn find_sample_rate(tail: &ByteWindow) -> Option<u32> {
	let bytes = tail.as_bytes();

	let mut candidate = tail.rfind(VORBIS_TOKEN);
	while let Some(pos) = candidate {
		// Resume the search just short of this token
		candidate = rfind_subslice(&bytes[..pos + VORBIS_TOKEN.len() - 1], VORBIS_TOKEN);

		let start = pos + SAMPLE_RATE_OFFSET;
		let Some(sample_rate) = bytes.get(start..start + 4) else {
			log::trace!("OGG: Vorbis token at {pos} is too close to the end");
			continue;
		};

		match LittleEndian::read_u32(sample_rate) {
			0 => continue,
			sample_rate => return Some(sample_rate),
		}
	}

	None
}
