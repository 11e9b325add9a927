//! Various configuration options to control audioprobe

mod parse_options;

pub use parse_options::ParseOptions;
