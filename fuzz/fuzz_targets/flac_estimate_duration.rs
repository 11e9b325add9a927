#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
	let _ = audioprobe::flac::estimate_duration(&mut Cursor::new(data));
});
