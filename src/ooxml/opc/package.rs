/// The in-memory package model.
///
/// [`Package`] holds every part of a Word package between load and save:
/// parts whose names end in `.xml` or `.xml.rels` as parsed XML trees, all
/// others as opaque bytes. Edits go straight to the trees and the package is
/// written back entry by entry.
use crate::common::xml::XmlDocument;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::ids::ObjectIds;
use crate::ooxml::opc::options::SaveOptions;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_PARTNAME, is_xml_partname};
use crate::ooxml::opc::phys_pkg::{PhysPkgReader, PhysPkgWriter};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::io::{BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, trace};

/// An editable Word package.
///
/// Part names are zip member names, e.g. `word/document.xml`. Every name
/// lives in exactly one of the two part maps.
#[derive(Debug, Clone, Default)]
pub struct Package {
    binary_parts: BTreeMap<String, Vec<u8>>,
    xml_parts: BTreeMap<String, XmlDocument>,
    ids: ObjectIds,
}

impl Package {
    /// Create an empty package with no parts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a package from a file.
    ///
    /// # Example
    /// ```no_run
    /// use longan::ooxml::opc::Package;
    ///
    /// let pkg = Package::open("document.docx")?;
    /// # Ok::<(), longan::ooxml::opc::OpcError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let phys_reader = PhysPkgReader::open(path)?;
        Self::from_phys_reader(phys_reader)
    }

    /// Load a package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let phys_reader = PhysPkgReader::new(reader)?;
        Self::from_phys_reader(phys_reader)
    }

    /// Load a package from the bytes of a zip archive.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    fn from_phys_reader<R: Read + Seek>(mut phys_reader: PhysPkgReader<R>) -> Result<Self> {
        let mut package = Self::new();

        phys_reader.for_each_member(|name, blob| {
            if is_xml_partname(name) {
                let doc = XmlDocument::parse(&blob).map_err(|source| OpcError::MalformedXml {
                    path: name.to_string(),
                    source,
                })?;
                trace!(part = name, "parsed XML part");
                package.xml_parts.insert(name.to_string(), doc);
            } else {
                trace!(part = name, bytes = blob.len(), "read binary part");
                package.binary_parts.insert(name.to_string(), blob);
            }
            Ok(())
        })?;

        package.ids = ObjectIds::scan(&package.xml_parts);
        debug!(
            xml_parts = package.xml_parts.len(),
            binary_parts = package.binary_parts.len(),
            max_object_id = package.ids.current(),
            "loaded package"
        );
        Ok(package)
    }

    /// Serialize the package to zip bytes with default options.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with(&SaveOptions::default())
    }

    pub fn to_bytes_with(&self, options: &SaveOptions) -> Result<Vec<u8>> {
        let cursor = self.write_to(Cursor::new(Vec::new()), options)?;
        Ok(cursor.into_inner())
    }

    /// Write the package as a zip archive into `sink` and return the sink.
    ///
    /// `[Content_Types].xml` comes first, every other part follows in part
    /// name order.
    pub fn write_to<W: Write + Seek>(&self, sink: W, options: &SaveOptions) -> Result<W> {
        let encoded = encode_xml_parts(&self.xml_parts, options.parallel);

        let mut entries: BTreeMap<&str, &[u8]> = self
            .binary_parts
            .iter()
            .map(|(name, blob)| (name.as_str(), blob.as_slice()))
            .collect();
        entries.extend(encoded.iter().map(|(name, blob)| (*name, blob.as_slice())));

        let mut writer = PhysPkgWriter::new(sink, options.compression);
        if let Some(content_types) = entries.remove(CONTENT_TYPES_PARTNAME) {
            writer.write(CONTENT_TYPES_PARTNAME, content_types)?;
        }
        for (name, blob) in &entries {
            trace!(part = name, bytes = blob.len(), "writing part");
            writer.write(name, blob)?;
        }
        let sink = writer.finish()?;

        debug!(
            xml_parts = self.xml_parts.len(),
            binary_parts = self.binary_parts.len(),
            "wrote package"
        );
        Ok(sink)
    }

    /// Save the package to `path` with default options.
    ///
    /// The archive is written to a temporary file next to `path` and renamed
    /// over it only once complete, so a failed save leaves an existing file
    /// untouched.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with(path, &SaveOptions::default())
    }

    pub fn save_with<P: AsRef<Path>>(&self, path: P, options: &SaveOptions) -> Result<()> {
        let path = path.as_ref();
        // `Path::parent` returns `Some("")` for bare file names.
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = self.write_to(BufWriter::new(tmp.as_file_mut()), options)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|err| err.error)?;

        debug!(path = %path.display(), "saved package");
        Ok(())
    }

    /// Get a parsed XML part.
    #[inline]
    pub fn xml_part(&self, partname: &str) -> Option<&XmlDocument> {
        self.xml_parts.get(partname)
    }

    #[inline]
    pub fn xml_part_mut(&mut self, partname: &str) -> Option<&mut XmlDocument> {
        self.xml_parts.get_mut(partname)
    }

    /// Get the raw bytes of a binary part.
    #[inline]
    pub fn binary_part(&self, partname: &str) -> Option<&[u8]> {
        self.binary_parts.get(partname).map(Vec::as_slice)
    }

    /// Add or replace an XML part.
    ///
    /// A binary part of the same name is dropped, and object ids inside the
    /// new tree are taken into account by later allocations.
    pub fn insert_xml_part(&mut self, partname: &str, doc: XmlDocument) -> Option<XmlDocument> {
        self.binary_parts.remove(partname);
        let key = partname.to_string();
        self.ids.observe(ObjectIds::scan([(&key, &doc)]).current());
        self.xml_parts.insert(key, doc)
    }

    /// Add or replace a binary part, dropping an XML part of the same name.
    pub fn insert_binary_part(&mut self, partname: &str, blob: Vec<u8>) -> Option<Vec<u8>> {
        self.xml_parts.remove(partname);
        self.binary_parts.insert(partname.to_string(), blob)
    }

    /// Remove a part of either kind, returning whether it existed.
    pub fn remove_part(&mut self, partname: &str) -> bool {
        self.xml_parts.remove(partname).is_some() || self.binary_parts.remove(partname).is_some()
    }

    #[inline]
    pub fn contains_part(&self, partname: &str) -> bool {
        self.xml_parts.contains_key(partname) || self.binary_parts.contains_key(partname)
    }

    /// All part names, sorted.
    pub fn part_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .xml_parts
            .keys()
            .chain(self.binary_parts.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    /// Names of the parsed XML parts, sorted.
    pub fn xml_part_names(&self) -> impl Iterator<Item = &str> {
        self.xml_parts.keys().map(String::as_str)
    }

    /// Names of the binary parts, sorted.
    pub fn binary_part_names(&self) -> impl Iterator<Item = &str> {
        self.binary_parts.keys().map(String::as_str)
    }

    /// Number of parts of both kinds.
    #[inline]
    pub fn part_count(&self) -> usize {
        self.xml_parts.len() + self.binary_parts.len()
    }

    /// The object id allocator.
    #[inline]
    pub fn object_ids(&self) -> &ObjectIds {
        &self.ids
    }

    /// Issue a fresh package-wide object id.
    #[inline]
    pub fn allocate_object_id(&mut self) -> Result<u64> {
        self.ids.allocate()
    }

    /// Get an XML part, creating it from `template` when missing.
    pub(crate) fn xml_part_or_insert(
        &mut self,
        partname: &str,
        template: &str,
    ) -> Result<&mut XmlDocument> {
        let doc = match self.xml_parts.entry(partname.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!(part = partname, "creating part from template");
                entry.insert(XmlDocument::parse(template.as_bytes())?)
            },
        };
        Ok(doc)
    }

    /// Borrow an XML part together with the id allocator.
    pub(crate) fn xml_part_and_ids_mut(
        &mut self,
        partname: &str,
    ) -> Option<(&mut XmlDocument, &mut ObjectIds)> {
        let doc = self.xml_parts.get_mut(partname)?;
        Some((doc, &mut self.ids))
    }

    /// Number of binary parts whose name starts with `prefix`.
    pub(crate) fn count_binary_parts_with_prefix(&self, prefix: &str) -> usize {
        self.binary_parts
            .keys()
            .filter(|name| name.starts_with(prefix))
            .count()
    }
}

#[cfg(feature = "parallel")]
fn encode_xml_parts(
    parts: &BTreeMap<String, XmlDocument>,
    parallel: bool,
) -> Vec<(&str, Vec<u8>)> {
    use rayon::prelude::*;

    if !parallel {
        return encode_sequential(parts);
    }
    let parts: Vec<(&String, &XmlDocument)> = parts.iter().collect();
    parts
        .par_iter()
        .map(|&(name, doc)| (name.as_str(), doc.to_bytes()))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn encode_xml_parts(
    parts: &BTreeMap<String, XmlDocument>,
    _parallel: bool,
) -> Vec<(&str, Vec<u8>)> {
    encode_sequential(parts)
}

fn encode_sequential(parts: &BTreeMap<String, XmlDocument>) -> Vec<(&str, Vec<u8>)> {
    parts
        .iter()
        .map(|(name, doc)| (name.as_str(), doc.to_bytes()))
        .collect()
}
