use crate::util::{named_temp_file, ogg_vorbis, temp_file};

use audioprobe::config::ParseOptions;
use audioprobe::error::ErrorKind;
use audioprobe::file::AudioFormat;
use audioprobe::ogg::estimate_duration;
use audioprobe::properties::{DurationSource, DurationStrategy};

#[test_log::test]
fn read_tail_heuristic() {
	let mut file = temp_file(&ogg_vorbis(48000, 96_000));

	let estimate = estimate_duration(&mut file, ParseOptions::new()).unwrap();
	assert_eq!(estimate.strategy(), DurationStrategy::TailHeuristic);
	assert!((estimate.seconds() - (96_000.0 * 8.0 / (48000.0 * 16.0))).abs() < 1e-9);
}

#[test_log::test]
fn no_vorbis_header() {
	let mut stream = b"OggS\x00\x02".to_vec();
	stream.extend(b"OpusHead");
	stream.resize(20_000, 0);

	let err = estimate_duration(&mut temp_file(&stream), ParseOptions::new()).unwrap_err();
	assert!(matches!(
		err.kind(),
		ErrorKind::DurationIndeterminate(AudioFormat::Ogg)
	));

	// Still identified, even with a misleading extension
	let file = named_temp_file(&stream, "flac");
	let report = audioprobe::probe_path(file.path()).unwrap();
	assert_eq!(report.format(), AudioFormat::Ogg);
	assert_eq!(report.source(), DurationSource::Unknown);
}

#[test_log::test]
fn probe_path_ogg() {
	let file = named_temp_file(&ogg_vorbis(44100, 88_200), "ogg");

	let report = audioprobe::probe_path(file.path()).unwrap();
	assert_eq!(report.format(), AudioFormat::Ogg);
	assert_eq!(
		report.source(),
		DurationSource::Estimator(DurationStrategy::TailHeuristic)
	);
	assert!((report.duration_seconds() - 1.0).abs() < 1e-9);
}
