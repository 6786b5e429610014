/// Helpers for part names.
///
/// Parts are keyed by their zip member name: a relative path with forward
/// slashes and no leading slash, e.g. `word/document.xml`. The package
/// itself is addressed by the empty name, its relationships live in
/// `_rels/.rels`.

/// Member name of the content types part
pub const CONTENT_TYPES_PARTNAME: &str = "[Content_Types].xml";

/// Suffix of relationship parts
pub const RELS_SUFFIX: &str = ".rels";

/// Directory portion of a part name, without trailing slash.
///
/// Empty for parts at the package root.
#[inline]
pub fn directory(partname: &str) -> &str {
    partname.rfind('/').map_or("", |pos| &partname[..pos])
}

/// Filename portion of a part name.
#[inline]
pub fn filename(partname: &str) -> &str {
    partname.rfind('/').map_or(partname, |pos| &partname[pos + 1..])
}

/// Extension of a part name without the leading period, empty when absent.
pub fn extension(partname: &str) -> &str {
    let filename = filename(partname);
    filename.rfind('.').map_or("", |pos| &filename[pos + 1..])
}

/// Name of the relationship part belonging to `partname`.
///
/// For example, `word/_rels/document.xml.rels` for `word/document.xml`.
pub fn rels_partname(partname: &str) -> String {
    let dir = directory(partname);
    let filename = filename(partname);
    if dir.is_empty() {
        format!("_rels/{filename}{RELS_SUFFIX}")
    } else {
        format!("{dir}/_rels/{filename}{RELS_SUFFIX}")
    }
}

/// Whether the part is held as a parsed XML tree.
///
/// Only `.xml` and `.xml.rels` names qualify, so the package-level
/// `_rels/.rels` stays binary.
#[inline]
pub fn is_xml_partname(partname: &str) -> bool {
    partname.ends_with(".xml") || partname.ends_with(".xml.rels")
}
