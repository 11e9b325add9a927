//! Identify audio containers and estimate their duration from their headers.
//!
//! MP3, FLAC, and OGG are recognized from the first few kilobytes of a source, and the duration is
//! estimated without decoding any audio. When the content isn't enough, the file extension and the
//! result of an external tag library can be used as fallbacks.
//!
//! # Examples
//!
//! ## Probing a file
//!
//! ```rust,no_run
//! # fn main() -> audioprobe::error::Result<()> {
//! use audioprobe::probe::Probe;
//! use audioprobe::probe_path;
//!
//! // The content decides the format, the extension ("mp3" in this case)
//! // is only used if the content isn't recognized.
//! let path = "test.mp3";
//! let report = probe_path(path)?;
//!
//! println!(
//! 	"{}: {:.2}s ({})",
//! 	report.format(),
//! 	report.duration_seconds(),
//! 	report.source()
//! );
//!
//! // The same thing, with a `Probe`
//! let report2 = Probe::open(path)?.read()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Using an existing reader
//!
//! ```rust
//! # fn main() -> audioprobe::error::Result<()> {
//! use audioprobe::file::AudioFormat;
//! use audioprobe::probe_reader;
//! use std::io::Cursor;
//!
//! // A single 128 kbps MPEG-1 Layer III frame header, followed by silence
//! let mut mp3 = vec![0xFF, 0xFB, 0x40, 0x00];
//! mp3.resize(16_000, 0);
//!
//! let report = probe_reader(Cursor::new(mp3), "upload.bin")?;
//!
//! assert_eq!(report.format(), AudioFormat::Mp3);
//! assert!((report.duration_seconds() - 1.0).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the estimators directly
//!
//! ```rust
//! # fn main() -> audioprobe::error::Result<()> {
//! use audioprobe::properties::DurationStrategy;
//! use std::io::Cursor;
//!
//! let mut flac = b"fLaC\x80\x00\x00\x12".to_vec();
//! flac.extend([0x10, 0x00, 0x10, 0x00, 0, 0, 0, 0, 0, 0]);
//! flac.extend([0x0A, 0xC4, 0x42, 0xF0, 0x00, 0x06, 0xBA, 0xA8]);
//!
//! let estimate = audioprobe::flac::estimate_duration(&mut Cursor::new(flac))?;
//!
//! assert_eq!(estimate.strategy(), DurationStrategy::ExactSampleCount);
//! assert_eq!(estimate.seconds(), 10.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Important format-specific notes
//!
//! Only the FLAC estimate is exact. MP3 estimates depend on the encoder writing a Xing/VBRI header,
//! and OGG estimates assume 16-bit audio. See the module documentation of each format.

pub mod config;
pub mod error;
pub mod file;
pub(crate) mod macros;
pub mod probe;
pub mod properties;
pub mod tag;
mod util;

pub mod flac;
pub mod id3;
pub mod mpeg;
pub mod ogg;

pub use crate::probe::{probe_path, probe_reader};

pub use util::io;
