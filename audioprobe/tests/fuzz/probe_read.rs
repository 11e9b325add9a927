use crate::timeout_test;
use audioprobe::config::ParseOptions;

#[test_log::test]
fn id3_size_overflow() {
	// Largest possible synchsafe size, the container offset can't be read
	let data = b"ID3\x04\x00\x00\x7F\x7F\x7F\x7FfLaC".to_vec();
	timeout_test(data, ParseOptions::new());
}

#[test_log::test]
fn id3_non_synchsafe_size() {
	// The high bits of each size byte must be ignored
	let data = b"ID3\x04\x00\x00\xFF\xFF\xFF\xFF\xFF\xFB\x40\x00".to_vec();
	timeout_test(data, ParseOptions::new());
}

#[test_log::test]
fn tiny_windows() {
	let mut data = vec![0xFF, 0xFB, 0x40, 0x00];
	data.resize(100_000, 0xFF);

	let options = ParseOptions::new()
		.header_window(0)
		.vbr_search_window(0)
		.tail_window(0);
	timeout_test(data, options);
}

#[test_log::test]
fn signatures_everywhere() {
	let data = b"OggSfLaCID3\xFF\xFBvorbisXingVBRI".repeat(512);
	timeout_test(data, ParseOptions::new());
}
