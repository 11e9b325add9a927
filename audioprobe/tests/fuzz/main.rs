#![allow(missing_docs)]

use audioprobe::config::ParseOptions;
use audioprobe::probe::Probe;

use std::io::Cursor;
use std::thread;
use std::time::Instant;

mod flac_estimate_duration;
mod mpeg_estimate_duration;
mod probe_read;

/// Probe `data` on another thread, failing if it takes more than 3 seconds
#[allow(clippy::missing_panics_doc)]
pub fn timeout_test(data: Vec<u8>, options: ParseOptions) {
	let instant = Instant::now();
	let thread = thread::spawn(move || {
		let _ = Probe::new(Cursor::new(data)).options(options).read();
	});

	while instant.elapsed().as_secs() < 3 {
		if thread.is_finished() {
			thread.join().unwrap();
			return;
		}
	}

	panic!("Failed to run test");
}
