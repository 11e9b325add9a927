//! Format and duration arbitration

use crate::config::ParseOptions;
use crate::error::{ErrorKind, Result};
use crate::file::{AudioFormat, FormatGuessResult};
use crate::macros::err;
use crate::properties::{DurationEstimate, DurationSource};
use crate::tag::{TagReader, TagReport, read_tags_guarded};
use crate::util::io::{ByteSource, ByteWindow};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

/// Which input decided the format of a [`ProbeReport`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FormatOrigin {
	/// The content of the source
	Content,
	/// The file extension
	Extension,
	/// The format reported by the tag library
	TagLibrary,
	/// Nothing could determine the format
	Unknown,
}

/// The result of a [`Probe`]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProbeReport {
	pub(crate) format: AudioFormat,
	pub(crate) duration_seconds: f64,
	pub(crate) source: DurationSource,
	pub(crate) format_origin: FormatOrigin,
}

impl ProbeReport {
	/// The resolved format
	pub fn format(&self) -> AudioFormat {
		self.format
	}

	/// The duration in seconds, 0 if unknown
	pub fn duration_seconds(&self) -> f64 {
		self.duration_seconds
	}

	/// The duration, [`Duration::ZERO`] if unknown
	pub fn duration(&self) -> Duration {
		Duration::try_from_secs_f64(self.duration_seconds).unwrap_or(Duration::ZERO)
	}

	/// Where the duration came from
	pub fn source(&self) -> DurationSource {
		self.source
	}

	/// Which input decided the format
	pub fn format_origin(&self) -> FormatOrigin {
		self.format_origin
	}
}

/// A format agnostic reader
///
/// This combines the format sniffed from the content, the format implied by the file extension,
/// and the result of a tag library (if any) into a single [`ProbeReport`].
///
/// ## Usage
///
/// The content always takes priority. The extension is only used when the content
/// isn't recognized, and the tag library only when neither gives an answer.
///
/// ```rust
/// use audioprobe::file::AudioFormat;
/// use audioprobe::probe::{FormatOrigin, Probe};
/// use std::io::Cursor;
///
/// # fn main() -> audioprobe::error::Result<()> {
/// // Not recognizable, but the extension is a hint
/// let reader = Cursor::new(vec![0; 64]);
///
/// let report = Probe::new(reader).with_extension_hint("song.ogg").read()?;
/// assert_eq!(report.format(), AudioFormat::Ogg);
/// assert_eq!(report.format_origin(), FormatOrigin::Extension);
/// # Ok(()) }
/// ```
pub struct Probe<R: ByteSource> {
	inner: R,
	options: Option<ParseOptions>,
	extension_format: Option<AudioFormat>,
	tag_report: Option<TagReport>,
}

impl<R: ByteSource> Probe<R> {
	/// Create a new `Probe`
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::probe::Probe;
	/// use std::fs::File;
	/// use std::io::BufReader;
	///
	/// # fn main() -> audioprobe::error::Result<()> {
	/// # let dir = tempfile::tempdir()?;
	/// # let path = dir.path().join("song.flac");
	/// # std::fs::write(&path, b"fLaC")?;
	/// let file = File::open(path)?;
	/// let reader = BufReader::new(file);
	///
	/// let probe = Probe::new(reader);
	/// # Ok(()) }
	/// ```
	#[must_use]
	pub const fn new(reader: R) -> Self {
		Self {
			inner: reader,
			options: None,
			extension_format: None,
			tag_report: None,
		}
	}

	/// Use a file name to derive a fallback format
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::file::AudioFormat;
	/// use audioprobe::probe::Probe;
	/// use std::io::Cursor;
	///
	/// let probe = Probe::new(Cursor::new(Vec::new())).with_extension_hint("upload.MP3");
	/// assert_eq!(probe.extension_format(), Some(AudioFormat::Mp3));
	/// ```
	#[must_use]
	pub fn with_extension_hint<P>(mut self, name: P) -> Self
	where
		P: AsRef<Path>,
	{
		self.extension_format = AudioFormat::from_path(name);
		log::debug!(
			"Probe: Guessed format `{:?}` from extension",
			self.extension_format
		);
		self
	}

	/// The format derived from the file extension, if any
	pub fn extension_format(&self) -> Option<AudioFormat> {
		self.extension_format
	}

	/// Set the [`ParseOptions`] for the Probe
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::config::ParseOptions;
	/// use audioprobe::probe::Probe;
	/// use std::io::Cursor;
	///
	/// // By default, the duration will be estimated.
	/// // In this example, we only want the format.
	/// let options = ParseOptions::new().read_duration(false);
	///
	/// let probe = Probe::new(Cursor::new(Vec::new())).options(options);
	/// ```
	#[must_use]
	pub fn options(mut self, options: ParseOptions) -> Self {
		self.options = Some(options);
		self
	}

	/// Provide the result of an earlier tag library parse
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::file::AudioFormat;
	/// use audioprobe::probe::{FormatOrigin, Probe};
	/// use audioprobe::properties::DurationSource;
	/// use audioprobe::tag::TagReport;
	/// use std::io::Cursor;
	///
	/// # fn main() -> audioprobe::error::Result<()> {
	/// let tag_report = TagReport {
	/// 	format: Some(String::from("MP3")),
	/// 	duration_seconds: Some(31.5),
	/// 	..TagReport::default()
	/// };
	///
	/// let report = Probe::new(Cursor::new(vec![0; 64]))
	/// 	.tag_report(tag_report)
	/// 	.read()?;
	///
	/// assert_eq!(report.format(), AudioFormat::Mp3);
	/// assert_eq!(report.format_origin(), FormatOrigin::TagLibrary);
	/// assert_eq!(report.source(), DurationSource::TagLibrary);
	/// # Ok(()) }
	/// ```
	#[must_use]
	pub fn tag_report(mut self, tag_report: TagReport) -> Self {
		self.tag_report = Some(tag_report);
		self
	}

	/// Run a tag library over the source, and use its result
	///
	/// The reader is isolated with [`read_tags_guarded`]. If it fails or panics, the failure is
	/// logged and the probe carries on without a tag report.
	#[must_use]
	pub fn tag_reader(mut self, reader: &dyn TagReader) -> Self {
		match read_tags_guarded(reader, &mut self.inner) {
			Ok(report) => self.tag_report = Some(report),
			Err(e) => log::debug!("Probe: Ignoring tag library result: {e}"),
		}

		self
	}

	/// Extract the reader
	pub fn into_inner(self) -> R {
		self.inner
	}

	/// Attempts to get the [`AudioFormat`] based on the data in the reader
	///
	/// # Errors
	///
	/// See [`sniff_format`]
	pub fn guess_format(&mut self) -> Result<AudioFormat> {
		let options = self.options.unwrap_or_default();
		sniff_format_with(&mut self.inner, options.header_window)
	}

	/// Resolve the format, and estimate the duration
	///
	/// An indeterminate duration isn't an error. The report will keep the duration reported by the
	/// tag library (if any), or 0.
	///
	/// # Errors
	///
	/// * The source is smaller than 4 bytes ([`ErrorKind::SourceTooSmall`])
	/// * Any I/O error from the underlying source
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::file::AudioFormat;
	/// use audioprobe::probe::Probe;
	/// use audioprobe::properties::{DurationSource, DurationStrategy};
	/// use std::io::Cursor;
	///
	/// # fn main() -> audioprobe::error::Result<()> {
	/// let mut flac = b"fLaC\x80\x00\x00\x12".to_vec();
	/// flac.extend([0x10, 0x00, 0x10, 0x00, 0, 0, 0, 0, 0, 0]);
	/// flac.extend([0x0A, 0xC4, 0x42, 0xF0, 0x00, 0x06, 0xBA, 0xA8]);
	///
	/// // The extension is wrong, but the content wins
	/// let report = Probe::new(Cursor::new(flac)).with_extension_hint("a.mp3").read()?;
	///
	/// assert_eq!(report.format(), AudioFormat::Flac);
	/// assert_eq!(report.duration_seconds(), 10.0);
	/// assert_eq!(
	/// 	report.source(),
	/// 	DurationSource::Estimator(DurationStrategy::ExactSampleCount)
	/// );
	/// # Ok(()) }
	/// ```
	pub fn read(mut self) -> Result<ProbeReport> {
		let options = self.options.unwrap_or_default();

		let (format, format_origin) = self.resolve_format(options)?;
		log::debug!("Probe: Resolved format {format} ({format_origin:?})");

		let mut report = ProbeReport {
			format,
			duration_seconds: 0.0,
			source: DurationSource::Unknown,
			format_origin,
		};

		if let Some(seconds) = self.tag_report.as_ref().and_then(TagReport::duration) {
			report.duration_seconds = seconds;
			report.source = DurationSource::TagLibrary;
		}

		if !options.read_duration || !format.is_known() {
			return Ok(report);
		}

		match estimate_duration(&mut self.inner, format, options) {
			Ok(estimate) => {
				report.duration_seconds = estimate.seconds();
				report.source = DurationSource::Estimator(estimate.strategy());
			},
			Err(e) if !e.is_recoverable() => return Err(e),
			Err(e) => log::warn!(
				"Probe: Unable to estimate the duration ({e}), keeping the {} duration",
				report.source
			),
		}

		Ok(report)
	}

	fn resolve_format(&mut self, options: ParseOptions) -> Result<(AudioFormat, FormatOrigin)> {
		let tag_format = self.tag_report.as_ref().and_then(TagReport::audio_format);

		let resolved = match sniff_format_with(&mut self.inner, options.header_window) {
			Ok(format) => (format, FormatOrigin::Content),
			Err(e) if matches!(e.kind(), ErrorKind::UnrecognizedFormat) => {
				log::debug!("Probe: Content not recognized, falling back");

				if let Some(format) = self.extension_format {
					(format, FormatOrigin::Extension)
				} else if let Some(format) = tag_format {
					(format, FormatOrigin::TagLibrary)
				} else {
					(AudioFormat::Unknown, FormatOrigin::Unknown)
				}
			},
			Err(e) => return Err(e),
		};

		if let Some(tag_format) = tag_format.filter(|format| *format != resolved.0) {
			log::warn!(
				"Probe: Tag library reports {tag_format}, but the file was resolved as {}",
				resolved.0
			);
		}

		Ok(resolved)
	}
}

impl Probe<BufReader<File>> {
	/// Opens a file for reading
	///
	/// The extension of `path` is used as a fallback format, see [`Probe::with_extension_hint`].
	///
	/// # Errors
	///
	/// * `path` does not exist
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use audioprobe::file::AudioFormat;
	/// use audioprobe::probe::Probe;
	///
	/// # fn main() -> audioprobe::error::Result<()> {
	/// let probe = Probe::open("path/to/my.mp3")?;
	///
	/// // Guessed from the "mp3" extension, see `AudioFormat::from_ext`
	/// assert_eq!(probe.extension_format(), Some(AudioFormat::Mp3));
	/// # Ok(()) }
	/// ```
	pub fn open<P>(path: P) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();
		log::debug!("Probe: Opening `{}` for reading", path.display());

		let probe = Self::new(BufReader::new(File::open(path)?));
		Ok(probe.with_extension_hint(path))
	}
}

/// Determine the [`AudioFormat`] of a source from its content
///
/// The first [`ParseOptions::DEFAULT_HEADER_WINDOW`] bytes are searched for a FLAC or OGG signature.
/// Failing that, a leading ID3v2 tag or MPEG frame sync means MP3.
///
/// # Errors
///
/// * The source is smaller than 4 bytes ([`ErrorKind::SourceTooSmall`])
/// * Nothing was recognized ([`ErrorKind::UnrecognizedFormat`])
/// * Any I/O error from the underlying source
///
/// # Examples
///
/// ```rust
/// use audioprobe::file::AudioFormat;
/// use audioprobe::probe::sniff_format;
/// use std::io::Cursor;
///
/// # fn main() -> audioprobe::error::Result<()> {
/// // An ID3v2 tag (of 4 bytes), followed by a FLAC stream
/// let mut reader = Cursor::new(b"ID3\x04\x00\x00\x00\x00\x00\x04\x00\x00\x00\x00fLaC".to_vec());
/// assert_eq!(sniff_format(&mut reader)?, AudioFormat::Flac);
/// # Ok(()) }
/// ```
pub fn sniff_format<S>(source: &mut S) -> Result<AudioFormat>
where
	S: ByteSource + ?Sized,
{
	sniff_format_with(source, ParseOptions::DEFAULT_HEADER_WINDOW)
}

fn sniff_format_with<S>(source: &mut S, header_window: usize) -> Result<AudioFormat>
where
	S: ByteSource + ?Sized,
{
	let window = ByteWindow::read(source, 0, header_window)?;

	let format = match AudioFormat::from_buffer_inner(window.as_bytes()) {
		Some(FormatGuessResult::Determined(format)) => format,
		Some(FormatGuessResult::MaybePrecededByTag(tag)) => {
			let offset = tag.container_offset();
			log::debug!("Probe: Checking for a FLAC stream past the ID3v2 tag, at {offset}");

			match ByteWindow::read(source, offset, 4) {
				Ok(container) if container.starts_with(b"fLaC") => AudioFormat::Flac,
				Ok(_) => AudioFormat::Mp3,
				Err(e) if matches!(e.kind(), ErrorKind::SourceTooSmall) => AudioFormat::Mp3,
				Err(e) => return Err(e),
			}
		},
		None => err!(UnrecognizedFormat),
	};

	log::debug!("Probe: Sniffed format: {format}");
	Ok(format)
}

/// Estimate the duration of a source with a known format
///
/// # Errors
///
/// * `format` is [`AudioFormat::Unknown`] ([`ErrorKind::UnrecognizedFormat`])
/// * See [`mpeg::estimate_duration`](crate::mpeg::estimate_duration),
///   [`flac::estimate_duration`](crate::flac::estimate_duration), and
///   [`ogg::estimate_duration`](crate::ogg::estimate_duration)
pub fn estimate_duration<S>(
	source: &mut S,
	format: AudioFormat,
	options: ParseOptions,
) -> Result<DurationEstimate>
where
	S: ByteSource,
{
	match format {
		AudioFormat::Mp3 => crate::mpeg::estimate_duration(source, options),
		AudioFormat::Flac => crate::flac::estimate_duration(source),
		AudioFormat::Ogg => crate::ogg::estimate_duration(source, options),
		AudioFormat::Unknown => err!(UnrecognizedFormat),
	}
}

/// Probe a file at `path`
///
/// NOTE: The extension of `path` is used as a fallback format
///
/// # Errors
///
/// See:
///
/// * [`Probe::open`]
/// * [`Probe::read`]
///
/// # Examples
///
/// ```rust,no_run
/// # fn main() -> audioprobe::error::Result<()> {
/// let report = audioprobe::probe_path("path/to/my.flac")?;
/// println!("{} ({}s)", report.format(), report.duration_seconds());
/// # Ok(()) }
/// ```
pub fn probe_path<P>(path: P) -> Result<ProbeReport>
where
	P: AsRef<Path>,
{
	Probe::open(path)?.read()
}

/// Probe a reader, using `filename` as a fallback format
///
/// # Errors
///
/// See [`Probe::read`]
///
/// # Examples
///
/// ```rust
/// use audioprobe::file::AudioFormat;
/// use std::io::Cursor;
///
/// # fn main() -> audioprobe::error::Result<()> {
/// let reader = Cursor::new(b"OggS\x00\x02\x00\x00".to_vec());
///
/// let report = audioprobe::probe_reader(reader, "upload.bin")?;
/// assert_eq!(report.format(), AudioFormat::Ogg);
/// assert_eq!(report.duration_seconds(), 0.0);
/// # Ok(()) }
/// ```
pub fn probe_reader<R, P>(reader: R, filename: P) -> Result<ProbeReport>
where
	R: ByteSource,
	P: AsRef<Path>,
{
	Probe::new(reader).with_extension_hint(filename).read()
}
