//! MPEG audio specific items
//!
//! Only MPEG-1 Layer III streams have a known bitrate, anything else relies on
//! a VBR header for its duration.

mod constants;
pub(crate) mod header;
mod properties;

pub use header::{Layer, MpegFrameHeader, MpegVersion};
pub use properties::estimate_duration;
