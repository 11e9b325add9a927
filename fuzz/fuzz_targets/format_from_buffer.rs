#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
	let _ = audioprobe::file::AudioFormat::from_buffer(data);
});
