use crate::util::{named_temp_file, temp_file};

use audioprobe::config::ParseOptions;
use audioprobe::error::ErrorKind;
use audioprobe::probe::Probe;

fn too_small(content: &[u8]) {
	let err = Probe::new(temp_file(content)).read().unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::SourceTooSmall));

	let err = audioprobe::mpeg::estimate_duration(&mut temp_file(content), ParseOptions::new())
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::SourceTooSmall));

	let err = audioprobe::flac::estimate_duration(&mut temp_file(content)).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::SourceTooSmall));

	let err = audioprobe::ogg::estimate_duration(&mut temp_file(content), ParseOptions::new())
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::SourceTooSmall));
}

#[test_log::test]
fn zero_sized() {
	too_small(&[]);
}

#[test_log::test]
fn partial_signatures() {
	too_small(b"f");
	too_small(b"fLa");
	too_small(b"Og");
	too_small(b"ID3");
	too_small(&[0xFF, 0xFB, 0x40]);
}

#[test_log::test]
fn extension_does_not_rescue_small_files() {
	let file = named_temp_file(b"fLa", "flac");

	let err = audioprobe::probe_path(file.path()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::SourceTooSmall));
}
