//! Format classification

mod audio_format;

pub use audio_format::{AudioFormat, EXTENSIONS};

pub(crate) use audio_format::FormatGuessResult;
