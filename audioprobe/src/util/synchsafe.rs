//! Utilities for working with synchsafe integers

/// An integer that may be stored synchsafe
///
/// A synchsafe integer only uses the low 7 bits of each byte, so it can never be mistaken
/// for an MPEG frame sync.
pub(crate) trait SynchsafeInteger: Sized {
	/// Unsynchronise a synchsafe integer
	///
	/// The high bit of every byte is ignored.
	fn unsynch(self) -> Self;
}

impl SynchsafeInteger for u32 {
	fn unsynch(self) -> Self {
		((self & 0x7F00_0000) >> 3)
			| ((self & 0x007F_0000) >> 2)
			| ((self & 0x0000_7F00) >> 1)
			| (self & 0x0000_007F)
	}
}
