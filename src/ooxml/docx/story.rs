/// Stories: parts whose root holds the paragraphs of a document.
///
/// The main document body and every header are stories. A [`Story`] borrows
/// the package mutably, so paragraphs handed out by it edit the part in place
/// and images it links are registered with that same part.
use crate::common::xml::Element;
use crate::ooxml::docx::paragraph::{PARAGRAPH, Paragraph, ParagraphRef};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::package::Package;

/// Part name of the main document
pub const DOCUMENT_PARTNAME: &str = "word/document.xml";

const HEADER_STEM: &str = "word/header";

/// `word/media/` relative to the `word/` directory stories live in
const MEDIA_TARGET_DIR: &str = "media/";

/// A view over one story part.
///
/// # Examples
///
/// ```rust,no_run
/// use longan::ooxml::opc::Package;
///
/// let mut pkg = Package::open("document.docx")?;
/// let mut body = pkg.body()?;
/// println!("{} paragraphs", body.paragraph_count());
/// if let Some(mut paragraph) = body.paragraph(0) {
///     paragraph.add_run().add_text("Hello");
/// }
/// pkg.save("document.docx")?;
/// # Ok::<(), longan::ooxml::opc::OpcError>(())
/// ```
#[derive(Debug)]
pub struct Story<'a> {
    package: &'a mut Package,
    partname: String,
}

/// The main document body, `word/document.xml`.
pub type Body<'a> = Story<'a>;

/// A header part, `word/header<N>.xml`.
pub type Header<'a> = Story<'a>;

impl<'a> Story<'a> {
    /// Part name of this story, e.g. `word/header1.xml`.
    #[inline]
    pub fn partname(&self) -> &str {
        &self.partname
    }

    fn root(&self) -> Option<&Element> {
        self.package.xml_part(&self.partname).map(|doc| &doc.root)
    }

    /// Paragraphs in document order, in the namespace of the root.
    ///
    /// Paragraphs nested in tables or text boxes are included.
    pub fn paragraphs(&self) -> impl Iterator<Item = ParagraphRef<'_>> + Clone + '_ {
        self.root()
            .into_iter()
            .flat_map(|root| root.search(root.namespace(), PARAGRAPH))
            .map(ParagraphRef::new)
    }

    #[inline]
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    /// Mutable view of the paragraph at `index` in
    /// [`paragraphs`](Self::paragraphs) order.
    pub fn paragraph(&mut self, index: usize) -> Option<Paragraph<'_>> {
        let (doc, ids) = self.package.xml_part_and_ids_mut(&self.partname)?;
        let path = doc
            .root
            .search_paths(doc.root.namespace(), PARAGRAPH)
            .into_iter()
            .nth(index)?;
        let element = doc.root.at_path_mut(&path)?;
        Some(Paragraph::new(element, ids))
    }

    /// Call `edit` with a mutable view of every paragraph, in
    /// [`paragraphs`](Self::paragraphs) order.
    ///
    /// Paragraph positions are collected once up front. A paragraph removed
    /// by an earlier edit, e.g. one inside a cleared text box, is skipped.
    pub fn for_each_paragraph_mut<F>(&mut self, mut edit: F)
    where
        F: FnMut(Paragraph<'_>),
    {
        let Some((doc, ids)) = self.package.xml_part_and_ids_mut(&self.partname) else {
            return;
        };
        let paths = doc.root.search_paths(doc.root.namespace(), PARAGRAPH);
        for path in &paths {
            let Some(element) = doc.root.at_path_mut(path) else {
                continue;
            };
            if element.local_name() == PARAGRAPH {
                edit(Paragraph::new(element, ids));
            }
        }
    }

    /// Text of every paragraph, one per line.
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(|paragraph| paragraph.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Link media part `name` (e.g. `image1.png`) to this story.
    ///
    /// Returns the relationship id to embed in a drawing. Linking the same
    /// media twice returns the same id.
    pub fn link_image(&mut self, name: &str) -> Result<String> {
        let target = format!("{MEDIA_TARGET_DIR}{name}");
        self.package.link_target(&self.partname, &target)
    }
}

impl Package {
    /// The main document body.
    pub fn body(&mut self) -> Result<Body<'_>> {
        self.story(DOCUMENT_PARTNAME)
    }

    /// Part names of all headers, sorted.
    pub fn headers(&self) -> Vec<String> {
        self.xml_part_names()
            .filter(|name| is_header_partname(name))
            .map(str::to_string)
            .collect()
    }

    /// The header stored at `partname`, as listed by [`headers`](Self::headers).
    pub fn header(&mut self, partname: &str) -> Result<Header<'_>> {
        if !is_header_partname(partname) {
            return Err(OpcError::PartNotFound(partname.to_string()));
        }
        self.story(partname)
    }

    fn story(&mut self, partname: &str) -> Result<Story<'_>> {
        if self.xml_part(partname).is_none() {
            return Err(OpcError::PartNotFound(partname.to_string()));
        }
        Ok(Story {
            package: self,
            partname: partname.to_string(),
        })
    }
}

fn is_header_partname(partname: &str) -> bool {
    partname.starts_with(HEADER_STEM) && partname.ends_with(".xml")
}
