//! The boundary to an external tag library
//!
//! Tag reading itself is not done here. A tag library can be plugged in through [`TagReader`],
//! and its result is only consulted for the format and duration it reports.

use crate::error::{ErrorKind, ProbeError, Result};
use crate::file::AudioFormat;
use crate::util::io::ByteSource;

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use data_encoding::BASE64;

/// The MIME type assumed for pictures that don't declare one
pub const DEFAULT_PICTURE_MIME_TYPE: &str = "image/jpeg";

/// Cover art reported by a tag library
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TagPicture {
	/// The picture's MIME type, may be empty
	pub mime_type: String,
	/// The raw picture data
	pub data: Vec<u8>,
}

impl TagPicture {
	/// Render the picture as a `data:` URI
	///
	/// An empty MIME type is replaced with [`DEFAULT_PICTURE_MIME_TYPE`].
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::tag::TagPicture;
	///
	/// let picture = TagPicture {
	/// 	mime_type: String::from("image/png"),
	/// 	data: b"PNG".to_vec(),
	/// };
	///
	/// assert_eq!(picture.data_uri(), "data:image/png;base64,UE5H");
	/// ```
	pub fn data_uri(&self) -> String {
		let mime_type = match self.mime_type.trim() {
			"" => DEFAULT_PICTURE_MIME_TYPE,
			mime_type => mime_type,
		};

		format!("data:{};base64,{}", mime_type, BASE64.encode(&self.data))
	}
}

/// The result of a tag library's parse
///
/// Only [`TagReport::format`] and [`TagReport::duration_seconds`] are used while probing,
/// everything else is carried along for the caller.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TagReport {
	/// The format label the library reported (ex. "MP3", "FLAC", "OPUS")
	pub format: Option<String>,
	/// The duration the library reported
	pub duration_seconds: Option<f64>,
	/// Title
	pub title: Option<String>,
	/// Artist
	pub artist: Option<String>,
	/// Album
	pub album: Option<String>,
	/// Genre
	pub genre: Option<String>,
	/// Year
	pub year: Option<u32>,
	/// Track number
	pub track: Option<u32>,
	/// Disc number
	pub disc: Option<u32>,
	/// Cover art
	pub picture: Option<TagPicture>,
}

impl TagReport {
	/// Map the reported format label to an [`AudioFormat`]
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::file::AudioFormat;
	/// use audioprobe::tag::TagReport;
	///
	/// let report = TagReport {
	/// 	format: Some(String::from("OPUS")),
	/// 	..TagReport::default()
	/// };
	///
	/// assert_eq!(report.audio_format(), Some(AudioFormat::Ogg));
	/// ```
	pub fn audio_format(&self) -> Option<AudioFormat> {
		self.format.as_deref().and_then(AudioFormat::from_label)
	}

	/// The reported duration, if it is finite and positive
	pub fn duration(&self) -> Option<f64> {
		self.duration_seconds
			.filter(|seconds| seconds.is_finite() && *seconds > 0.0)
	}
}

/// A tag library that can parse a [`ByteSource`]
///
/// This is implemented for any `Fn(&mut dyn ByteSource) -> Result<TagReport>`.
///
/// # Examples
///
/// ```rust
/// use audioprobe::io::ByteSource;
/// use audioprobe::tag::{TagReader, TagReport};
/// use std::io::Cursor;
///
/// # fn main() -> audioprobe::error::Result<()> {
/// let reader = |_: &mut dyn ByteSource| -> audioprobe::error::Result<TagReport> {
/// 	Ok(TagReport {
/// 		format: Some(String::from("FLAC")),
/// 		..TagReport::default()
/// 	})
/// };
///
/// let report = reader.read_tags(&mut Cursor::new(Vec::new()))?;
/// assert_eq!(report.format.as_deref(), Some("FLAC"));
/// # Ok(()) }
/// ```
pub trait TagReader {
	/// Parse the tags in `source`
	///
	/// # Errors
	///
	/// Implementations may fail for any reason, and may even panic.
	/// See [`read_tags_guarded`].
	fn read_tags(&self, source: &mut dyn ByteSource) -> Result<TagReport>;
}

impl<F> TagReader for F
where
	F: Fn(&mut dyn ByteSource) -> Result<TagReport>,
{
	fn read_tags(&self, source: &mut dyn ByteSource) -> Result<TagReport> {
		self(source)
	}
}

/// Run a [`TagReader`], converting any failure into [`ErrorKind::TagLibrary`]
///
/// A panic within the reader is caught and will not propagate.
///
/// # Errors
///
/// The reader failed or panicked ([`ErrorKind::TagLibrary`])
///
/// # Examples
///
/// ```rust
/// use audioprobe::error::ErrorKind;
/// use audioprobe::io::ByteSource;
/// use audioprobe::tag::{TagReport, read_tags_guarded};
/// use std::io::Cursor;
///
/// let reader = |_: &mut dyn ByteSource| -> audioprobe::error::Result<TagReport> {
/// 	panic!("malformed frame");
/// };
///
/// let err = read_tags_guarded(&reader, &mut Cursor::new(Vec::new())).unwrap_err();
/// assert!(matches!(err.kind(), ErrorKind::TagLibrary(_)));
/// ```
pub fn read_tags_guarded(reader: &dyn TagReader, source: &mut dyn ByteSource) -> Result<TagReport> {
	let message = match catch_unwind(AssertUnwindSafe(|| reader.read_tags(source))) {
		Ok(Ok(report)) => return Ok(report),
		Ok(Err(e)) => e.to_string(),
		Err(payload) => format!("panicked: {}", panic_message(&*payload)),
	};

	log::warn!("Probe: Tag library failed: {message}");
	Err(ProbeError::new(ErrorKind::TagLibrary(message)))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
	if let Some(message) = payload.downcast_ref::<&str>() {
		return message;
	}

	if let Some(message) = payload.downcast_ref::<String>() {
		return message;
	}

	"unknown cause"
}
