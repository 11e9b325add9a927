use crate::timeout_test;
use audioprobe::config::ParseOptions;

use std::io::Cursor;

#[test_log::test]
fn sync_flood() {
	// Every offset looks like the start of a frame
	let data = vec![0xFF; 1024 * 1024];
	timeout_test(data, ParseOptions::new());
}

#[test_log::test]
fn smallest_frames() {
	// 32 kbps, 48000 Hz: 96 byte frames, back to back for the entire scan limit
	let frame = {
		let mut frame = vec![0xFF, 0xFB, 0x14, 0x00];
		frame.resize(96, 0);
		frame
	};

	timeout_test(frame.repeat(20_000), ParseOptions::new());
}

#[test_log::test]
fn huge_xing_frame_count() {
	let mut data = vec![0xFF, 0xFB, 0x40, 0x00];
	data.extend(b"Xing\x00\x00\x00\x01\xFF\xFF\xFF\xFF");
	data.resize(1024, 0);

	let estimate =
		audioprobe::mpeg::estimate_duration(&mut Cursor::new(data), ParseOptions::new()).unwrap();
	assert!(estimate.seconds().is_finite());
}

#[test_log::test]
fn unbounded_scan_limit() {
	let mut data = vec![0xFF, 0xFB, 0x40, 0x00];
	data.resize(2 * 1024 * 1024, 0x00);

	timeout_test(data, ParseOptions::new().frame_scan_limit(u64::MAX));
}
