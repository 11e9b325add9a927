#![allow(missing_docs)]

mod flac;
mod ogg;
mod probe;
pub(crate) mod util;
mod zero_sized;
