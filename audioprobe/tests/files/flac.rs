use crate::util::{FlacParams, flac, id3v2_tag, temp_file};

use audioprobe::error::ErrorKind;
use audioprobe::file::AudioFormat;
use audioprobe::flac::{estimate_duration, read_stream_info};
use audioprobe::probe::Probe;
use audioprobe::properties::{DurationSource, DurationStrategy};

#[test_log::test]
#[allow(clippy::float_cmp)]
fn read_exact() {
	let mut file = temp_file(&flac(FlacParams::default(), 50_000));

	let estimate = estimate_duration(&mut file).unwrap();
	assert_eq!(estimate.strategy(), DurationStrategy::ExactSampleCount);
	assert_eq!(estimate.seconds(), 10.0);
}

#[test_log::test]
fn read_stream_info_fields() {
	let params = FlacParams {
		sample_rate: 96000,
		channels: 6,
		bits_per_sample: 24,
		total_samples: 123_456_789,
		..FlacParams::default()
	};

	let info = read_stream_info(&mut temp_file(&flac(params, 0))).unwrap();
	assert_eq!(info.sample_rate, 96000);
	assert_eq!(info.channels, 6);
	assert_eq!(info.bits_per_sample, 24);
	assert_eq!(info.total_samples, 123_456_789);
	assert_eq!(info.min_block_size, 4096);
	assert_eq!(info.max_block_size, 4096);
}

#[test_log::test]
#[allow(clippy::float_cmp)]
fn read_tag_wrapped() {
	let mut stream = id3v2_tag(300);
	stream.extend(flac(FlacParams::default(), 0));

	let estimate = estimate_duration(&mut temp_file(&stream)).unwrap();
	assert_eq!(estimate.seconds(), 10.0);

	let report = Probe::new(temp_file(&stream))
		.with_extension_hint("song.mp3")
		.read()
		.unwrap();
	assert_eq!(report.format(), AudioFormat::Flac);
	assert_eq!(report.duration_seconds(), 10.0);
}

#[test_log::test]
fn fallback_strategies() {
	let unknown_length = FlacParams {
		total_samples: 0,
		..FlacParams::default()
	};

	let estimate = estimate_duration(&mut temp_file(&flac(unknown_length, 100_000))).unwrap();
	assert_eq!(estimate.strategy(), DurationStrategy::BlockSizeHeuristic);

	let no_block_size = FlacParams {
		min_block_size: 0,
		max_block_size: 0,
		..unknown_length
	};

	let estimate = estimate_duration(&mut temp_file(&flac(no_block_size, 100_000))).unwrap();
	assert_eq!(estimate.strategy(), DurationStrategy::PcmEquivalent);
	assert!((estimate.seconds() - 100_000.0 / (44100.0 * 2.0 * 2.0)).abs() < 1e-9);
}

#[test_log::test]
fn streaminfo_not_first() {
	let params = FlacParams {
		block_type: 4,
		..FlacParams::default()
	};

	let err = estimate_duration(&mut temp_file(&flac(params, 0))).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::StructuralViolation(_)));

	// The probe still reports the format, but the duration is unknown
	let report = Probe::new(temp_file(&flac(params, 0))).read().unwrap();
	assert_eq!(report.format(), AudioFormat::Flac);
	assert_eq!(report.source(), DurationSource::Unknown);
}

#[test_log::test]
fn zero_sample_rate() {
	let params = FlacParams {
		sample_rate: 0,
		..FlacParams::default()
	};

	let err = estimate_duration(&mut temp_file(&flac(params, 0))).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::StructuralViolation(_)));
}

#[test_log::test]
fn truncated_streaminfo() {
	let stream = flac(FlacParams::default(), 0);

	let err = estimate_duration(&mut temp_file(&stream[..20])).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::StructuralViolation(_)));
}
