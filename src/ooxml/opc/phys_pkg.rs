//! Provides a general interface to a physical package (zip file).
//!
//! Reading visits every file entry once, in archive order, handing out the
//! decompressed bytes. Writing appends entries one by one to a single zip
//! writer.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::options::Compression;
use std::fs::File;
use std::io::{BufReader, Read, Seek, Write};
use std::path::Path;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Physical package reader over a zip archive.
pub struct PhysPkgReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl PhysPkgReader<BufReader<File>> {
    /// Open a package file.
    ///
    /// # Errors
    /// Returns [`OpcError::PackageNotFound`] if the file doesn't exist and an
    /// archive error if it isn't a valid zip file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> PhysPkgReader<R> {
    /// Create a reader from any seekable source.
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    /// Decompress every file entry and pass it to `visit` with its member name.
    ///
    /// Directory entries are skipped. The first error, from the archive or
    /// from `visit`, stops the walk.
    pub fn for_each_member<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&str, Vec<u8>) -> Result<()>,
    {
        for index in 0..self.archive.len() {
            let mut file = self.archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut blob = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());
            // A corrupt deflate stream surfaces as an io error.
            file.read_to_end(&mut blob).map_err(ZipError::Io)?;
            drop(file);
            visit(&name, blob)?;
        }
        Ok(())
    }
}

/// Physical package writer.
pub struct PhysPkgWriter<W: Write + Seek> {
    archive: ZipWriter<W>,
    options: SimpleFileOptions,
}

impl<W: Write + Seek> PhysPkgWriter<W> {
    /// Create a writer whose entries all use `compression`.
    pub fn new(sink: W, compression: Compression) -> Self {
        Self {
            archive: ZipWriter::new(sink),
            options: SimpleFileOptions::default().compression_method(compression.method()),
        }
    }

    /// Append one entry.
    pub fn write(&mut self, membername: &str, blob: &[u8]) -> Result<()> {
        self.archive.start_file(membername, self.options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Write the central directory and return the sink.
    pub fn finish(self) -> Result<W> {
        Ok(self.archive.finish()?)
    }
}
