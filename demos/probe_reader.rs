#![allow(missing_docs)]

use audioprobe::config::ParseOptions;
use audioprobe::probe::Probe;

use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(name = "probe_reader", about = "Identify audio files and estimate their duration")]
struct Opt {
	/// Only identify the format
	#[structopt(short, long)]
	format_only: bool,

	/// Measure tagged MP3 files from the end of their ID3v2 tag
	#[structopt(short, long)]
	skip_tag: bool,

	#[structopt(parse(from_os_str), required = true)]
	paths: Vec<PathBuf>,
}

fn main() {
	env_logger::init();

	let opt = Opt::from_args();

	let options = ParseOptions::new()
		.read_duration(!opt.format_only)
		.skip_leading_tag_mpeg(opt.skip_tag);

	for path in &opt.paths {
		let report = match Probe::open(path).and_then(|probe| probe.options(options).read()) {
			Ok(report) => report,
			Err(e) => {
				eprintln!("ERROR: {}: {e}", path.display());
				continue;
			},
		};

		let duration = report.duration();
		let seconds = duration.as_secs() % 60;

		println!("--- {} ---", path.display());
		println!("Format: {} ({:?})", report.format(), report.format_origin());
		println!(
			"Duration: {:02}:{:02} ({:.3}s)",
			duration.as_secs() / 60,
			seconds,
			report.duration_seconds()
		);
		println!("Duration source: {}", report.source());
	}
}
