//! OGG specific items
//!
//! Pages are never parsed, the duration is a rough estimate from the file size.

mod constants;
mod properties;

pub use properties::estimate_duration;
