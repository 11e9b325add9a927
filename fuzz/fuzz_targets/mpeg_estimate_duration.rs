#![no_main]

use std::io::Cursor;

use audioprobe::config::ParseOptions;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
	let _ = audioprobe::mpeg::estimate_duration(&mut Cursor::new(data), ParseOptions::new());
});
