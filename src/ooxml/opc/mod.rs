/// Open Packaging Conventions (OPC) layer of a Word package.
///
/// This module holds the package model and the managers that edit it:
///
/// - Part store with zip load and atomic save ([`Package`])
/// - Package-wide drawing object ids ([`ObjectIds`])
/// - Relationship parts ([`Relationship`])
/// - Content type defaults and media parts ([`MediaFormat`])
///
/// Parsed parts are plain [`XmlDocument`](crate::common::xml::XmlDocument)
/// trees, so any edit the typed views don't cover can be made directly.
pub mod constants;
pub mod content_types;
pub mod error;
pub mod ids;
pub mod media;
pub mod options;
pub mod package;
pub mod packuri;
pub mod phys_pkg;
pub mod rel;

// Re-export commonly used types
pub use error::{OpcError, Result};
pub use ids::ObjectIds;
pub use media::MediaFormat;
pub use options::{Compression, SaveOptions};
pub use package::Package;
pub use rel::Relationship;

/// In-memory packages shared by the tests of this crate.
#[cfg(test)]
pub(crate) mod fixtures {
    use image::{ImageFormat, RgbaImage};
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    pub const CONTENT_TYPES_XML: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\r\n",
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Default Extension="png" ContentType="image/png"/>"#,
        r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
        r#"<Override PartName="/word/header1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"/>"#,
        r#"</Types>"#,
    );

    pub const PACKAGE_RELS_XML: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
        r#"</Relationships>"#,
    );

    /// Three paragraphs: two runs `"Hello "` and `"World"`, a formatted run
    /// `"Second"`, and a run holding a drawing with `docPr` id 4.
    pub const DOCUMENT_XML: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\r\n",
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#,
        r#" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#,
        r#" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing""#,
        r#" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">"#,
        r#"<w:body>"#,
        r#"<w:p><w:r><w:t xml:space="preserve">Hello </w:t></w:r><w:r><w:t>World</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Second</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:drawing><wp:inline><wp:extent cx="9525" cy="9525"/>"#,
        r#"<wp:docPr id="4" name="Picture 4"/>"#,
        r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"/></a:graphic>"#,
        r#"</wp:inline></w:drawing></w:r></w:p>"#,
        r#"<w:sectPr><w:headerReference w:type="default" r:id="rId7"/></w:sectPr>"#,
        r#"</w:body></w:document>"#,
    );

    pub const DOCUMENT_RELS_XML: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        r#"<Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>"#,
        r#"</Relationships>"#,
    );

    /// One paragraph `"Header text"` and a drawing with `docPr` id 9.
    pub const HEADER_XML: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<w:hdr xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#,
        r#" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing">"#,
        r#"<w:p><w:r><w:t>Header text</w:t></w:r>"#,
        r#"<w:r><w:drawing><wp:anchor><wp:docPr id="9" name="Logo"/></wp:anchor></w:drawing></w:r></w:p>"#,
        r#"</w:hdr>"#,
    );

    pub const STYLES_XML: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#,
    );

    /// Encode a blank RGBA image of the given size as PNG.
    pub fn png(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbaImage::new(width, height)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    /// Zip `entries` in the given order.
    pub fn zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, blob) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(blob).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    /// Entries of [`minimal_docx`], in archive order.
    pub fn minimal_docx_parts() -> Vec<(&'static str, Vec<u8>)> {
        vec![
            ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes().to_vec()),
            ("_rels/.rels", PACKAGE_RELS_XML.as_bytes().to_vec()),
            ("word/document.xml", DOCUMENT_XML.as_bytes().to_vec()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.as_bytes().to_vec()),
            ("word/header1.xml", HEADER_XML.as_bytes().to_vec()),
            ("word/styles.xml", STYLES_XML.as_bytes().to_vec()),
            ("word/media/image1.png", png(2, 2)),
        ]
    }

    /// A small but complete Word package.
    pub fn minimal_docx() -> Vec<u8> {
        let parts = minimal_docx_parts();
        let entries: Vec<(&str, &[u8])> = parts
            .iter()
            .map(|(name, blob)| (*name, blob.as_slice()))
            .collect();
        zip(&entries)
    }
}
