/// Options controlling how a package is written back to a zip archive.
///
/// # Examples
///
/// ```rust
/// use longan::ooxml::opc::{Compression, SaveOptions};
///
/// // Create with defaults
/// let options = SaveOptions::default();
///
/// // Or customize
/// let options = SaveOptions::new()
///     .with_compression(Compression::Stored)
///     .with_parallel(false);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// How archive entries are compressed
    pub compression: Compression,
    /// Whether XML parts are encoded on the rayon thread pool
    pub parallel: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            compression: Compression::Deflated,
            parallel: true,
        }
    }
}

impl SaveOptions {
    /// Create a new `SaveOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression method used for every entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longan::ooxml::opc::{Compression, SaveOptions};
    ///
    /// let options = SaveOptions::new().with_compression(Compression::Stored);
    /// assert_eq!(options.compression, Compression::Stored);
    /// ```
    #[inline]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set whether XML parts are encoded in parallel.
    ///
    /// Entries are always written in the same order, so this only affects
    /// speed. Without the `parallel` feature the flag is ignored.
    #[inline]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Compression method for archive entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Deflate, as written by Word
    #[default]
    Deflated,
    /// No compression
    Stored,
}

impl Compression {
    pub(crate) fn method(self) -> zip::CompressionMethod {
        match self {
            Compression::Deflated => zip::CompressionMethod::Deflated,
            Compression::Stored => zip::CompressionMethod::Stored,
        }
    }
}
