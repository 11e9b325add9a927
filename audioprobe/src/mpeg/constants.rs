// Indexed by the 4-bit bitrate index, only consulted for MPEG-1 Layer III.
//
// This is the 32 kbps stepping, which tops out at 448 kbps.
pub(crate) const BITRATES: [u32; 16] = [
	0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0,
];

// [sample rate index][version], where version 0 is MPEG-1 and version 1 is MPEG-2.
//
// MPEG-2.5 has no column, and index 3 is reserved.
pub(crate) const SAMPLE_RATES: [[u32; 2]; 4] = [
	[44100, 22050],
	[48000, 24000],
	[32000, 16000],
	[0, 0],
];

pub(crate) const MPEG1_SAMPLES_PER_FRAME: u32 = 1152;
pub(crate) const MPEG2_SAMPLES_PER_FRAME: u32 = 576;

// Anything larger is a false sync
pub(crate) const MAX_SAMPLED_FRAME_SIZE: u32 = 1440;

pub(crate) const FRAME_SCAN_CHUNK_SIZE: usize = 4096;

// Offsets of the big-endian frame count, relative to the start of the tag
pub(crate) const XING_FRAME_COUNT_OFFSET: usize = 8;
pub(crate) const VBRI_FRAME_COUNT_OFFSET: usize = 14;
