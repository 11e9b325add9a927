//! Contains the errors that can arise within audioprobe
//!
//! The primary error is [`ProbeError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use crate::file::AudioFormat;

use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, ProbeError>`
pub type Result<T> = std::result::Result<T, ProbeError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	/// The source holds fewer than 4 bytes, so nothing can be classified
	SourceTooSmall,
	/// None of the known signatures matched
	///
	/// This is recoverable: callers fall back to the file extension.
	UnrecognizedFormat,
	/// The container violates its own layout (ex. a FLAC stream whose first block isn't STREAMINFO)
	///
	/// This is only fatal for the estimator that encountered it.
	StructuralViolation(FileDecodingError),
	/// The format is known, but every duration strategy came up empty
	DurationIndeterminate(AudioFormat),
	/// A tag-library collaborator failed or panicked
	TagLibrary(String),

	// Conversions for external errors
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
}

/// An error that arises while decoding a file
pub struct FileDecodingError {
	format: AudioFormat,
	description: &'static str,
}

impl FileDecodingError {
	/// Create a `FileDecodingError` from an [`AudioFormat`] and description
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::error::FileDecodingError;
	/// use audioprobe::file::AudioFormat;
	///
	/// let flac_error = FileDecodingError::new(AudioFormat::Flac, "STREAMINFO is not the first block");
	/// assert_eq!(flac_error.format(), AudioFormat::Flac);
	/// ```
	#[must_use]
	pub const fn new(format: AudioFormat, description: &'static str) -> Self {
		Self {
			format,
			description,
		}
	}

	/// Returns the associated [`AudioFormat`]
	pub fn format(&self) -> AudioFormat {
		self.format
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}: {:?}", self.format, self.description)
	}
}

impl Display for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.format, self.description)
	}
}

/// Errors that could occur within audioprobe
pub struct ProbeError {
	pub(crate) kind: ErrorKind,
}

impl ProbeError {
	/// Create a `ProbeError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::error::{ErrorKind, ProbeError};
	///
	/// let unknown_format = ProbeError::new(ErrorKind::UnrecognizedFormat);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::error::{ErrorKind, ProbeError};
	///
	/// let too_small = ProbeError::new(ErrorKind::SourceTooSmall);
	/// if let ErrorKind::SourceTooSmall = too_small.kind() {
	/// 	println!("Not enough bytes to look at");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// Whether the caller should fall back to another strategy rather than give up
	///
	/// I/O faults are the only errors that are never recoverable.
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::error::{ErrorKind, ProbeError};
	/// use audioprobe::file::AudioFormat;
	///
	/// let indeterminate = ProbeError::new(ErrorKind::DurationIndeterminate(AudioFormat::Ogg));
	/// assert!(indeterminate.is_recoverable());
	/// ```
	pub fn is_recoverable(&self) -> bool {
		!matches!(self.kind, ErrorKind::Io(_))
	}
}

impl std::error::Error for ProbeError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self.kind {
			ErrorKind::Io(ref err) => Some(err),
			_ => None,
		}
	}
}

impl Debug for ProbeError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<FileDecodingError> for ProbeError {
	fn from(input: FileDecodingError) -> Self {
		Self {
			kind: ErrorKind::StructuralViolation(input),
		}
	}
}

impl From<std::io::Error> for ProbeError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl Display for ProbeError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::Io(ref err) => write!(f, "{err}"),

			ErrorKind::SourceTooSmall => write!(f, "Source is too small to classify"),
			ErrorKind::UnrecognizedFormat => {
				write!(f, "No format could be determined from the provided source")
			},
			ErrorKind::StructuralViolation(ref decode_err) => write!(f, "{decode_err}"),
			ErrorKind::DurationIndeterminate(format) => {
				write!(f, "{format}: Unable to determine the duration")
			},
			ErrorKind::TagLibrary(ref message) => write!(f, "Tag library: {message}"),
		}
	}
}
