pub(super) const VORBIS_TOKEN: &[u8] = b"vorbis";

// Relative to the start of `VORBIS_TOKEN`, 3 bytes past its end
pub(super) const SAMPLE_RATE_OFFSET: usize = 9;

pub(super) const NOMINAL_BITS_PER_SAMPLE: u32 = 16;
