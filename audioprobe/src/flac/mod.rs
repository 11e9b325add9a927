//! Items for FLAC
//!
//! ## File notes
//!
//! * A FLAC stream may be preceded by an ID3v2 tag, which is skipped.
//! * The first metadata block **must** be STREAMINFO, anything else is rejected.

mod block;
mod properties;

pub use block::StreamInfo;
pub use properties::{estimate_duration, read_stream_info};
