use audioprobe::error::ErrorKind;

use std::io::Cursor;

fn estimate(data: &[u8]) -> audioprobe::error::Result<f64> {
	audioprobe::flac::estimate_duration(&mut Cursor::new(data.to_vec())).map(|e| e.seconds())
}

#[test_log::test]
fn marker_only() {
	let err = estimate(b"fLaC").unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::StructuralViolation(_)));
}

#[test_log::test]
fn max_values() {
	// Every STREAMINFO field at its maximum
	let mut data = b"fLaC\x80\xFF\xFF\xFF".to_vec();
	data.resize(4 + 4 + 18, 0xFF);

	let seconds = estimate(&data).unwrap();
	assert!(seconds.is_finite() && seconds > 0.0);
}

#[test_log::test]
fn id3_wrapping_nothing() {
	let err = estimate(b"ID3\x04\x00\x00\x00\x00\x00\x00").unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::StructuralViolation(_)));
}
