/// Options to control how audioprobe reads a source
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) read_duration: bool,
	pub(crate) header_window: usize,
	pub(crate) vbr_search_window: usize,
	pub(crate) frame_scan_limit: u64,
	pub(crate) min_sampled_frames: u32,
	pub(crate) tail_window: usize,
	pub(crate) skip_leading_tag_mpeg: bool,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	read_duration: true,
	/// 	header_window: 4096,
	/// 	vbr_search_window: 8192,
	/// 	frame_scan_limit: 524288,
	/// 	min_sampled_frames: 10,
	/// 	tail_window: 8192,
	/// 	skip_leading_tag_mpeg: false,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default number of bytes inspected when sniffing the format
	pub const DEFAULT_HEADER_WINDOW: usize = 4 * 1024;

	/// Default number of bytes searched for a Xing/Info/VBRI header
	pub const DEFAULT_VBR_SEARCH_WINDOW: usize = 8 * 1024;

	/// Default cap on the sequential MPEG frame scan
	pub const DEFAULT_FRAME_SCAN_LIMIT: u64 = 512 * 1024;

	/// Default number of frames the frame scan must exceed to be trusted
	pub const DEFAULT_MIN_SAMPLED_FRAMES: u32 = 10;

	/// Default number of bytes read from the end of an OGG file
	pub const DEFAULT_TAIL_WINDOW: usize = 8 * 1024;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			read_duration: true,
			header_window: Self::DEFAULT_HEADER_WINDOW,
			vbr_search_window: Self::DEFAULT_VBR_SEARCH_WINDOW,
			frame_scan_limit: Self::DEFAULT_FRAME_SCAN_LIMIT,
			min_sampled_frames: Self::DEFAULT_MIN_SAMPLED_FRAMES,
			tail_window: Self::DEFAULT_TAIL_WINDOW,
			skip_leading_tag_mpeg: false,
		}
	}

	/// Whether or not to estimate the duration
	///
	/// When disabled, only the format is resolved.
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::config::ParseOptions;
	///
	/// // By default, `read_duration` is enabled. Here, we only care about the format.
	/// let parsing_options = ParseOptions::new().read_duration(false);
	/// ```
	pub fn read_duration(&mut self, read_duration: bool) -> Self {
		self.read_duration = read_duration;
		*self
	}

	/// The number of bytes from the start of the source to inspect when sniffing
	///
	/// This will never go below 4 bytes.
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::config::ParseOptions;
	///
	/// // Only look at the first kilobyte
	/// let parsing_options = ParseOptions::new().header_window(1024);
	/// ```
	pub fn header_window(&mut self, header_window: usize) -> Self {
		self.header_window = header_window.max(4);
		*self
	}

	/// The number of bytes to search for a Xing/Info/VBRI header
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().vbr_search_window(16 * 1024);
	/// ```
	pub fn vbr_search_window(&mut self, vbr_search_window: usize) -> Self {
		self.vbr_search_window = vbr_search_window.max(4);
		*self
	}

	/// The maximum number of bytes walked while sampling MPEG frames
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::config::ParseOptions;
	///
	/// // Sample the first megabyte
	/// let parsing_options = ParseOptions::new().frame_scan_limit(1024 * 1024);
	/// ```
	pub fn frame_scan_limit(&mut self, frame_scan_limit: u64) -> Self {
		self.frame_scan_limit = frame_scan_limit;
		*self
	}

	/// The number of frames the MPEG frame scan must *exceed* for its result to be used
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().min_sampled_frames(32);
	/// ```
	pub fn min_sampled_frames(&mut self, min_sampled_frames: u32) -> Self {
		self.min_sampled_frames = min_sampled_frames;
		*self
	}

	/// The number of bytes read from the end of an OGG source
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().tail_window(4096);
	/// ```
	pub fn tail_window(&mut self, tail_window: usize) -> Self {
		self.tail_window = tail_window.max(4);
		*self
	}

	/// Whether the MPEG estimator may skip a leading ID3v2 tag to find the first frame
	///
	/// By default, an MPEG stream must start with a frame sync at offset 0, and a tagged MP3
	/// will have an indeterminate duration. With this enabled, the stream is measured
	/// from the end of the tag instead.
	///
	/// # Examples
	///
	/// ```rust
	/// use audioprobe::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().skip_leading_tag_mpeg(true);
	/// ```
	pub fn skip_leading_tag_mpeg(&mut self, skip_leading_tag_mpeg: bool) -> Self {
		self.skip_leading_tag_mpeg = skip_leading_tag_mpeg;
		*self
	}
}
