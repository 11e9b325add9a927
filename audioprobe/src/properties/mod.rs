//! Duration estimates and the strategies that produce them

use crate::error::Result;
use crate::file::AudioFormat;
use crate::macros::err;

use std::fmt::{Display, Formatter};
use std::time::Duration;

/// The method used to arrive at a [`DurationEstimate`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DurationStrategy {
	/// FLAC: the total sample count from STREAMINFO
	ExactSampleCount,
	/// MPEG: the frame count from a Xing/Info/VBRI header
	VbrFrameCount,
	/// MPEG: the average frame size over a sequential scan
	FrameSampling,
	/// MPEG: the bitrate of the leading frame, assumed constant
	CbrBitrate,
	/// FLAC: the stream size divided into blocks of the declared block size
	BlockSizeHeuristic,
	/// FLAC: the stream size treated as raw PCM
	PcmEquivalent,
	/// OGG: the sample rate from a Vorbis identification header near the end of the file
	TailHeuristic,
}

impl Display for DurationStrategy {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::ExactSampleCount => "exact sample count",
			Self::VbrFrameCount => "VBR frame count",
			Self::FrameSampling => "frame sampling",
			Self::CbrBitrate => "CBR bitrate",
			Self::BlockSizeHeuristic => "block size heuristic",
			Self::PcmEquivalent => "PCM equivalent",
			Self::TailHeuristic => "tail heuristic",
		};

		f.write_str(name)
	}
}

/// A duration in seconds, along with the strategy that produced it
///
/// An estimate is always finite and positive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DurationEstimate {
	seconds: f64,
	strategy: DurationStrategy,
}

impl DurationEstimate {
	/// Create a new `DurationEstimate`
	///
	/// This will return `None` if `seconds` isn't a finite, positive number.
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::properties::{DurationEstimate, DurationStrategy};
	///
	/// let estimate = DurationEstimate::new(10.0, DurationStrategy::ExactSampleCount).unwrap();
	/// assert_eq!(estimate.seconds(), 10.0);
	///
	/// assert!(DurationEstimate::new(0.0, DurationStrategy::CbrBitrate).is_none());
	/// assert!(DurationEstimate::new(f64::NAN, DurationStrategy::CbrBitrate).is_none());
	/// ```
	pub fn new(seconds: f64, strategy: DurationStrategy) -> Option<Self> {
		if !seconds.is_finite() || seconds <= 0.0 {
			return None;
		}

		Some(Self { seconds, strategy })
	}

	/// The duration in seconds
	pub fn seconds(&self) -> f64 {
		self.seconds
	}

	/// The strategy that produced the estimate
	pub fn strategy(&self) -> DurationStrategy {
		self.strategy
	}

	/// The estimate as a [`Duration`]
	///
	/// Values too large to be represented saturate to [`Duration::MAX`].
	pub fn as_duration(&self) -> Duration {
		Duration::try_from_secs_f64(self.seconds).unwrap_or(Duration::MAX)
	}
}

/// Where a reported duration came from
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum DurationSource {
	/// One of the built-in estimators
	Estimator(DurationStrategy),
	/// The duration reported by a tag library
	TagLibrary,
	/// No duration could be determined
	#[default]
	Unknown,
}

impl Display for DurationSource {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Estimator(strategy) => write!(f, "estimator ({strategy})"),
			Self::TagLibrary => f.write_str("tag library"),
			Self::Unknown => f.write_str("unknown"),
		}
	}
}

/// A single step in an estimator's fallback chain
///
/// `Ok(None)` means the strategy doesn't apply to this stream.
pub(crate) struct Strategy<C> {
	pub(crate) kind: DurationStrategy,
	pub(crate) run: fn(&mut C) -> Result<Option<f64>>,
}

impl<C> Strategy<C> {
	pub(crate) const fn new(kind: DurationStrategy, run: fn(&mut C) -> Result<Option<f64>>) -> Self {
		Self { kind, run }
	}
}

/// Run each strategy in order, returning the first positive estimate
///
/// Recoverable errors only disqualify the strategy that raised them. I/O errors are propagated.
pub(crate) fn first_estimate<C>(
	format: AudioFormat,
	context: &mut C,
	chain: &[Strategy<C>],
) -> Result<DurationEstimate> {
	for strategy in chain {
		match (strategy.run)(context) {
			Ok(Some(seconds)) => {
				if let Some(estimate) = DurationEstimate::new(seconds, strategy.kind) {
					log::debug!("{format}: Estimated {seconds}s using {}", strategy.kind);
					return Ok(estimate);
				}

				log::debug!(
					"{format}: {} produced an unusable duration ({seconds})",
					strategy.kind
				);
			},
			Ok(None) => log::trace!("{format}: {} does not apply", strategy.kind),
			Err(e) if !e.is_recoverable() => return Err(e),
			Err(e) => log::warn!("{format}: {} failed: {e}", strategy.kind),
		}
	}

	err!(DurationIndeterminate(format))
}
