#![no_main]

use std::io::Cursor;

use audioprobe::probe::Probe;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
	let _ = Probe::new(Cursor::new(data)).read();
});
