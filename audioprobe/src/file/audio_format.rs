use crate::id3::LeadingTagWrapper;
use crate::util::io::find_subslice;

use std::ffi::OsStr;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// List of extensions that map to a known [`AudioFormat`]
///
/// This can be used as a filter when scanning directories.
///
/// # Examples
///
/// ```rust,no_run
/// use audioprobe::file::EXTENSIONS;
/// use std::fs;
///
/// # fn main() -> audioprobe::error::Result<()> {
/// for entry in fs::read_dir(".")? {
/// 	let entry = entry?;
///
/// 	let path = entry.path();
/// 	let Some(extension) = path.extension() else {
/// 		continue;
/// 	};
///
/// 	// Skip any non-audio file extensions
/// 	if !EXTENSIONS.iter().any(|e| *e == extension) {
/// 		continue;
/// 	}
///
/// 	let report = audioprobe::probe_path(path)?;
/// }
/// # Ok(()) }
/// ```
pub const EXTENSIONS: &[&str] = &[
	// Also update `AudioFormat::from_name()` below
	"mp3", "mpeg", "flac", "ogg", "ogv", "opus",
];

/// The container format of a source
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default, Hash)]
pub enum AudioFormat {
	/// An MPEG audio frame stream
	Mp3,
	/// A native FLAC stream
	Flac,
	/// An OGG bitstream
	Ogg,
	/// Nothing could be determined
	#[default]
	Unknown,
}

impl AudioFormat {
	/// Attempts to extract an [`AudioFormat`] from an extension
	///
	/// The comparison is case-insensitive.
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::file::AudioFormat;
	///
	/// assert_eq!(AudioFormat::from_ext("mp3"), Some(AudioFormat::Mp3));
	/// assert_eq!(AudioFormat::from_ext("OPUS"), Some(AudioFormat::Ogg));
	/// assert_eq!(AudioFormat::from_ext("wav"), None);
	/// ```
	pub fn from_ext<E>(ext: E) -> Option<Self>
	where
		E: AsRef<OsStr>,
	{
		Self::from_name(ext.as_ref().to_str()?)
	}

	/// Attempts to determine an [`AudioFormat`] from a path
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::file::AudioFormat;
	/// use std::path::Path;
	///
	/// let path = Path::new("path/to/my.FLAC");
	/// assert_eq!(AudioFormat::from_path(path), Some(AudioFormat::Flac));
	/// ```
	pub fn from_path<P>(path: P) -> Option<Self>
	where
		P: AsRef<Path>,
	{
		let ext = path.as_ref().extension();
		ext.and_then(Self::from_ext)
	}

	/// Attempts to map a format label, as reported by a tag library, to an [`AudioFormat`]
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::file::AudioFormat;
	///
	/// assert_eq!(AudioFormat::from_label("FLAC"), Some(AudioFormat::Flac));
	/// assert_eq!(AudioFormat::from_label("OGV"), Some(AudioFormat::Ogg));
	/// assert_eq!(AudioFormat::from_label(""), None);
	/// ```
	pub fn from_label(label: &str) -> Option<Self> {
		Self::from_name(label.trim())
	}

	fn from_name(name: &str) -> Option<Self> {
		// Also update `EXTENSIONS` above
		match name.to_ascii_lowercase().as_str() {
			"mp3" | "mpeg" => Some(Self::Mp3),
			"flac" => Some(Self::Flac),
			"ogg" | "ogv" | "opus" => Some(Self::Ogg),
			_ => None,
		}
	}

	/// Whether the format is anything other than [`AudioFormat::Unknown`]
	pub fn is_known(self) -> bool {
		self != Self::Unknown
	}

	/// Attempts to extract an [`AudioFormat`] from a buffer
	///
	/// NOTES:
	///
	/// * This **will not** read past the buffer. If the buffer starts with an ID3v2 tag
	///   whose end lies beyond it, this returns `None`.
	///   For that case, use [`sniff_format`](crate::probe::sniff_format).
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::file::AudioFormat;
	///
	/// assert_eq!(AudioFormat::from_buffer(b"fLaC\0\0\0\x22"), Some(AudioFormat::Flac));
	/// assert_eq!(AudioFormat::from_buffer(&[0xFF, 0xFB, 0x90, 0x00]), Some(AudioFormat::Mp3));
	/// assert_eq!(AudioFormat::from_buffer(b"RIFF"), None);
	/// ```
	pub fn from_buffer(buf: &[u8]) -> Option<Self> {
		match Self::from_buffer_inner(buf) {
			Some(FormatGuessResult::Determined(format)) => Some(format),
			// We make no attempt to read past the tag here, since
			// we only have a fixed-size buffer to search from.
			_ => None,
		}
	}

	pub(crate) fn from_buffer_inner(buf: &[u8]) -> Option<FormatGuessResult> {
		use crate::mpeg::header::verify_frame_sync;

		if buf.len() < 4 {
			return None;
		}

		// Signatures anywhere in the buffer take priority over a leading tag,
		// as tag-wrapped FLAC would otherwise be reported as MP3
		if find_subslice(buf, b"fLaC").is_some() {
			return Some(FormatGuessResult::Determined(Self::Flac));
		}

		if find_subslice(buf, b"OggS").is_some() {
			return Some(FormatGuessResult::Determined(Self::Ogg));
		}

		if let Some(wrapper) = LeadingTagWrapper::parse(buf) {
			// Any `fLaC` that fits in the buffer was caught above
			if wrapper.container_offset() + 4 <= buf.len() as u64 {
				return Some(FormatGuessResult::Determined(Self::Mp3));
			}

			return Some(FormatGuessResult::MaybePrecededByTag(wrapper));
		}

		if verify_frame_sync([buf[0], buf[1]]) {
			return Some(FormatGuessResult::Determined(Self::Mp3));
		}

		None
	}
}

impl Display for AudioFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let label = match self {
			Self::Mp3 => "MP3",
			Self::Flac => "FLAC",
			Self::Ogg => "OGG",
			Self::Unknown => "UNKNOWN",
		};

		f.write_str(label)
	}
}

/// The result of an `AudioFormat` guess
///
/// External callers of `AudioFormat::from_buffer()` will only ever see `Determined` cases.
/// The remaining case is handled by `probe::sniff_format()`, which can read past the buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FormatGuessResult {
	/// The `AudioFormat` was guessed
	Determined(AudioFormat),
	/// The stream starts with an ID3v2 tag that extends past the buffer
	MaybePrecededByTag(LeadingTagWrapper),
}
