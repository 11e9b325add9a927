use crate::util::{FlacParams, cbr_mp3, flac, id3v2_tag, named_temp_file, temp_file, xing_mp3};

use audioprobe::config::ParseOptions;
use audioprobe::error::{ErrorKind, Result};
use audioprobe::file::AudioFormat;
use audioprobe::io::ByteSource;
use audioprobe::probe::{FormatOrigin, Probe, sniff_format};
use audioprobe::properties::{DurationSource, DurationStrategy};
use audioprobe::tag::{TagReader, TagReport};

use std::io::Cursor;

fn tag_report(format: &str, duration_seconds: Option<f64>) -> TagReport {
	TagReport {
		format: Some(String::from(format)),
		duration_seconds,
		title: Some(String::from("Foo title")),
		..TagReport::default()
	}
}

#[test_log::test]
fn content_beats_extension() {
	for ext in ["mp3", "ogg", "opus", "wav", "txt"] {
		let file = named_temp_file(&flac(FlacParams::default(), 0), ext);

		let report = audioprobe::probe_path(file.path()).unwrap();
		assert_eq!(report.format(), AudioFormat::Flac, "ext: {ext}");
		assert_eq!(report.format_origin(), FormatOrigin::Content);
	}
}

#[test_log::test]
fn id3_wrapped_flac() {
	let mut content = id3v2_tag(64);
	content.extend(flac(FlacParams::default(), 0));

	assert_eq!(
		sniff_format(&mut temp_file(&content)).unwrap(),
		AudioFormat::Flac
	);

	// Any other content behind the tag is assumed to be MP3
	let mut content = id3v2_tag(64);
	content.extend(b"RIFF\x00\x00\x00\x00WAVE");

	assert_eq!(
		sniff_format(&mut temp_file(&content)).unwrap(),
		AudioFormat::Mp3
	);
}

#[test_log::test]
fn extension_fallback() {
	let content = vec![0x42; 2048];

	for (ext, format) in [
		("mp3", AudioFormat::Mp3),
		("MPEG", AudioFormat::Mp3),
		("flac", AudioFormat::Flac),
		("ogv", AudioFormat::Ogg),
		("opus", AudioFormat::Ogg),
	] {
		let file = named_temp_file(&content, ext);

		let report = audioprobe::probe_path(file.path()).unwrap();
		assert_eq!(report.format(), format, "ext: {ext}");
		assert_eq!(report.format_origin(), FormatOrigin::Extension);
		assert_eq!(report.source(), DurationSource::Unknown);
	}

	let file = named_temp_file(&content, "m4a");
	let report = audioprobe::probe_path(file.path()).unwrap();
	assert_eq!(report.format(), AudioFormat::Unknown);
	assert_eq!(report.format_origin(), FormatOrigin::Unknown);
}

#[test_log::test]
fn probe_reader_extension_hint() {
	let report = audioprobe::probe_reader(Cursor::new(vec![0; 128]), "clip.opus").unwrap();
	assert_eq!(report.format(), AudioFormat::Ogg);

	let report = audioprobe::probe_reader(Cursor::new(vec![0; 128]), "").unwrap();
	assert_eq!(report.format(), AudioFormat::Unknown);
}

#[test_log::test]
fn tag_library_reconciliation() {
	// The estimator wins over the tag library
	let report = Probe::new(temp_file(&xing_mp3(1000, 64_000)))
		.tag_report(tag_report("MP3", Some(300.0)))
		.read()
		.unwrap();
	assert_eq!(
		report.source(),
		DurationSource::Estimator(DurationStrategy::VbrFrameCount)
	);
	assert!((report.duration_seconds() - 26.122).abs() < 0.001);

	// The tag library's format is the last resort
	let report = Probe::new(temp_file(&[0x42; 2048]))
		.tag_report(tag_report("Ogg Vorbis", None))
		.read()
		.unwrap();
	assert_eq!(report.format(), AudioFormat::Unknown);

	let report = Probe::new(temp_file(&[0x42; 2048]))
		.tag_report(tag_report("flac", Some(12.0)))
		.read()
		.unwrap();
	assert_eq!(report.format(), AudioFormat::Flac);
	assert_eq!(report.format_origin(), FormatOrigin::TagLibrary);
	assert_eq!(report.source(), DurationSource::TagLibrary);
	assert!((report.duration_seconds() - 12.0).abs() < f64::EPSILON);
}

#[test_log::test]
fn tag_reader_failures() {
	let failing = |_: &mut dyn ByteSource| -> Result<TagReport> {
		Err(std::io::Error::other("unsupported tag version").into())
	};
	let panicking = |_: &mut dyn ByteSource| -> Result<TagReport> { panic!("index out of bounds") };

	let readers: [&dyn TagReader; 2] = [&failing, &panicking];
	for reader in readers {
		let report = Probe::new(temp_file(&cbr_mp3(16_000)))
			.tag_reader(reader)
			.read()
			.unwrap();

		assert_eq!(report.format(), AudioFormat::Mp3);
		assert!((report.duration_seconds() - 1.0).abs() < 1e-9);
	}
}

#[test_log::test]
fn idempotent() {
	let file = named_temp_file(&xing_mp3(500, 32_000), "mp3");

	let first = audioprobe::probe_path(file.path()).unwrap();
	let second = audioprobe::probe_path(file.path()).unwrap();
	assert_eq!(first, second);
}

#[test_log::test]
fn reader_position_preserved() {
	use std::io::{Seek as _, SeekFrom};

	let mut file = temp_file(&cbr_mp3(16_000));
	file.seek(SeekFrom::Start(1234)).unwrap();

	let mut probe = Probe::new(file);
	assert_eq!(probe.guess_format().unwrap(), AudioFormat::Mp3);

	let mut file = probe.into_inner();
	assert_eq!(file.stream_position().unwrap(), 1234);
}

#[test_log::test]
fn format_only() {
	let report = Probe::new(temp_file(&flac(FlacParams::default(), 0)))
		.options(ParseOptions::new().read_duration(false))
		.read()
		.unwrap();

	assert_eq!(report.format(), AudioFormat::Flac);
	assert_eq!(report.source(), DurationSource::Unknown);
	assert_eq!(report.duration(), std::time::Duration::ZERO);
}

#[test_log::test]
fn nonexistent_path() {
	let dir = tempfile::tempdir().unwrap();

	let err = audioprobe::probe_path(dir.path().join("missing.mp3")).unwrap_err();
	let ErrorKind::Io(io_err) = err.kind() else {
		panic!("Expected an I/O error, got: {err:?}");
	};

	assert_eq!(io_err.kind(), std::io::ErrorKind::NotFound);
	assert!(!err.is_recoverable());
}
