// Shorthand for return Err(ProbeError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(ProbeError::new(ErrorKind::Variant))
// - err!(Variant(Value))   -> return Err(ProbeError::new(ErrorKind::Variant(Value)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::ProbeError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($value:expr)) => {
		return Err(crate::error::ProbeError::new(
			crate::error::ErrorKind::$variant($value),
		))
	};
}

// Shorthand for FileDecodingError::new(AudioFormat::Foo, "Message")
//
// Usage:
//
// - decode_err!(Variant, Message)
//
// or bail:
//
// - decode_err!(@BAIL Variant, Message)
macro_rules! decode_err {
	($format:ident, $reason:literal) => {
		Into::<crate::error::ProbeError>::into(crate::error::FileDecodingError::new(
			crate::file::AudioFormat::$format,
			$reason,
		))
	};
	(@BAIL $format:ident, $reason:literal) => {
		return Err(decode_err!($format, $reason))
	};
}

pub(crate) use {decode_err, err};
