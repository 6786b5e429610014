//! Fixed XML templates.
//!
//! Parts and fragments created on demand start from these. They are parsed
//! with the same tree primitive as package parts, so a template that fails to
//! parse is a defect surfaced as [`OpcError::Xml`](crate::ooxml::opc::OpcError::Xml).

/// Empty relationship part.
pub const RELATIONSHIPS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"/>"#,
);

/// Content types part with the defaults every package needs.
pub const CONTENT_TYPES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"</Types>"#,
);

/// Inline picture drawing.
///
/// `docPr@id`, `blip@r:embed` and the `cx`/`cy` of `extent` and `ext` are
/// placeholders stamped when the drawing is inserted into a run.
pub const DRAWING_XML: &str = concat!(
    r#"<w:drawing"#,
    r#" xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#,
    r#" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing""#,
    r#" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main""#,
    r#" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture""#,
    r#" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    r#"<wp:inline distT="0" distB="0" distL="0" distR="0">"#,
    r#"<wp:extent cx="0" cy="0"/>"#,
    r#"<wp:effectExtent l="0" t="0" r="0" b="0"/>"#,
    r#"<wp:docPr id="0" name="Picture"/>"#,
    r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
    r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
    r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="0" name="Picture"/><pic:cNvPicPr/></pic:nvPicPr>"#,
    r#"<pic:blipFill><a:blip r:embed=""/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
    r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/></a:xfrm>"#,
    r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
    r#"</pic:pic></a:graphicData></a:graphic>"#,
    r#"</wp:inline></w:drawing>"#,
);
