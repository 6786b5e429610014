/// Paragraph and Run views over a story part.
///
/// Both borrow an element of the part's tree mutably, together with the
/// package's object id allocator, so edits land directly in the package.
use crate::common::xml::{Element, Node, XML_NAMESPACE, XmlDocument};
use crate::ooxml::docx::template::DRAWING_XML;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::ids::{OBJECT_PROPERTIES, ObjectIds};
use tracing::debug;

pub(crate) const PARAGRAPH: &str = "p";
const RUN: &str = "r";
const RUN_PROPERTIES: &str = "rPr";
const TEXT: &str = "t";

/// Concatenated content of the `t` leaves under `element`, in its namespace.
pub(crate) fn leaf_text(element: &Element) -> String {
    element
        .search(element.namespace(), TEXT)
        .map(|t| t.text())
        .collect()
}

/// Read-only view of a paragraph, as yielded by
/// [`Story::paragraphs`](crate::ooxml::docx::Story::paragraphs).
#[derive(Debug, Clone, Copy)]
pub struct ParagraphRef<'a> {
    element: &'a Element,
}

impl<'a> ParagraphRef<'a> {
    pub(crate) fn new(element: &'a Element) -> Self {
        Self { element }
    }

    #[inline]
    pub fn element(&self) -> &'a Element {
        self.element
    }

    pub fn text(&self) -> String {
        leaf_text(self.element)
    }

    /// Runs in document order, including runs nested in hyperlinks.
    pub fn runs(&self) -> impl Iterator<Item = RunRef<'a>> + Clone + 'a {
        run_refs(self.element)
    }

    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs().count()
    }
}

/// Read-only view of a run.
#[derive(Debug, Clone, Copy)]
pub struct RunRef<'a> {
    element: &'a Element,
}

impl<'a> RunRef<'a> {
    #[inline]
    pub fn element(&self) -> &'a Element {
        self.element
    }

    pub fn text(&self) -> String {
        leaf_text(self.element)
    }
}

fn run_refs(paragraph: &Element) -> impl Iterator<Item = RunRef<'_>> + Clone + '_ {
    paragraph
        .search(paragraph.namespace(), RUN)
        .map(|element| RunRef { element })
}

/// A paragraph of a story.
///
/// Represents a `<w:p>` element. Paragraphs contain runs which in turn
/// contain the actual text.
#[derive(Debug)]
pub struct Paragraph<'a> {
    element: &'a mut Element,
    ids: &'a mut ObjectIds,
}

impl<'a> Paragraph<'a> {
    pub(crate) fn new(element: &'a mut Element, ids: &'a mut ObjectIds) -> Self {
        Self { element, ids }
    }

    /// The underlying `w:p` element.
    #[inline]
    pub fn element(&self) -> &Element {
        self.element
    }

    /// Text of all runs, concatenated.
    pub fn text(&self) -> String {
        leaf_text(self.element)
    }

    /// Runs of this paragraph in document order.
    ///
    /// Runs nested deeper, e.g. inside hyperlinks, are included.
    pub fn runs(&self) -> impl Iterator<Item = RunRef<'_>> + Clone + '_ {
        run_refs(self.element)
    }

    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs().count()
    }

    /// Mutable view of the run at `index` in [`runs`](Self::runs) order.
    pub fn run(&mut self, index: usize) -> Option<Run<'_>> {
        let path = self
            .element
            .search_paths(self.element.namespace(), RUN)
            .into_iter()
            .nth(index)?;
        let element = self.element.at_path_mut(&path)?;
        Some(Run::new(element, self.ids))
    }

    /// Call `edit` with a mutable view of every run, in [`runs`](Self::runs)
    /// order.
    ///
    /// Run positions are collected once up front. A run removed by an earlier
    /// edit is skipped.
    pub fn for_each_run_mut<F>(&mut self, mut edit: F)
    where
        F: FnMut(Run<'_>),
    {
        let paths = self.element.search_paths(self.element.namespace(), RUN);
        for path in &paths {
            let Some(element) = self.element.at_path_mut(path) else {
                continue;
            };
            if element.local_name() == RUN {
                edit(Run::new(element, self.ids));
            }
        }
    }

    /// Append an empty run and return it.
    pub fn add_run(&mut self) -> Run<'_> {
        let run = self.element.new_child(RUN);
        let element = self.element.push_element(run);
        Run::new(element, self.ids)
    }
}

/// A run of a paragraph.
///
/// Represents a `<w:r>` element: optional `rPr` formatting followed by text
/// leaves, breaks or drawings.
#[derive(Debug)]
pub struct Run<'a> {
    element: &'a mut Element,
    ids: &'a mut ObjectIds,
}

impl<'a> Run<'a> {
    pub(crate) fn new(element: &'a mut Element, ids: &'a mut ObjectIds) -> Self {
        Self { element, ids }
    }

    /// The underlying `w:r` element.
    #[inline]
    pub fn element(&self) -> &Element {
        self.element
    }

    /// Content of every `t` leaf under the run, in document order.
    pub fn text(&self) -> String {
        leaf_text(self.element)
    }

    /// Remove all content but the run properties.
    pub fn clear(&mut self) {
        self.element.retain_children(|node| {
            matches!(node, Node::Element(el) if el.local_name() == RUN_PROPERTIES)
        });
    }

    /// Append a `t` leaf holding `text`.
    ///
    /// The leaf takes the run's prefix and scope. Text with leading or
    /// trailing whitespace is marked `xml:space="preserve"`.
    pub fn add_text(&mut self, text: &str) {
        let mut leaf = self.element.new_child(TEXT);
        if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
            leaf.set_attribute(XML_NAMESPACE, "space", "preserve");
        }
        leaf.set_text(text);
        self.element.push_element(leaf);
    }

    /// Append an inline picture referencing relationship `r_id`.
    ///
    /// `cx` and `cy` are the displayed size in EMUs, see
    /// [`px_to_emu`](crate::common::unit::px_to_emu). Returns the object id
    /// given to the drawing.
    pub fn add_inline_image(&mut self, r_id: &str, cx: u64, cy: u64) -> Result<u64> {
        let mut drawing = XmlDocument::parse(DRAWING_XML.as_bytes())?.root;
        drawing.join_scope(self.element.scope());

        let id = self.ids.allocate()?;
        let id_value = id.to_string();
        let (cx, cy) = (cx.to_string(), cy.to_string());

        stamp(&mut drawing, OBJECT_PROPERTIES, |el| {
            el.set_attribute("", "id", id_value.as_str());
        });
        stamp(&mut drawing, "blip", |el| {
            el.set_attribute(namespace::OFC_RELATIONSHIPS, "embed", r_id);
        });
        // Outer and inner extents describe the same size.
        for local in ["extent", "ext"] {
            stamp(&mut drawing, local, |el| {
                el.set_attribute("", "cx", cx.as_str());
                el.set_attribute("", "cy", cy.as_str());
            });
        }

        self.element.push_element(drawing);
        debug!(object_id = id, r_id, "added inline image");
        Ok(id)
    }

    /// Strip `prefix` from the first non-empty text leaf.
    ///
    /// Only that leaf is looked at. Returns whether it started with `prefix`.
    pub fn trim_prefix(&mut self, prefix: &str) -> bool {
        let paths = self.element.search_paths(self.element.namespace(), TEXT);
        for path in &paths {
            let Some(leaf) = self.element.at_path_mut(path) else {
                continue;
            };
            let text = leaf.text();
            if text.is_empty() {
                continue;
            }
            return match text.strip_prefix(prefix) {
                Some(rest) => {
                    leaf.set_text(rest);
                    true
                },
                None => false,
            };
        }
        false
    }

    /// Strip `suffix` from the last non-empty text leaf.
    ///
    /// Only that leaf is looked at. Returns whether it ended with `suffix`.
    pub fn trim_suffix(&mut self, suffix: &str) -> bool {
        let paths = self.element.search_paths(self.element.namespace(), TEXT);
        for path in paths.iter().rev() {
            let Some(leaf) = self.element.at_path_mut(path) else {
                continue;
            };
            let text = leaf.text();
            if text.is_empty() {
                continue;
            }
            return match text.strip_suffix(suffix) {
                Some(rest) => {
                    leaf.set_text(rest);
                    true
                },
                None => false,
            };
        }
        false
    }
}

/// Apply `edit` to every descendant of `root` named `local`, any namespace.
fn stamp<F>(root: &mut Element, local: &str, mut edit: F)
where
    F: FnMut(&mut Element),
{
    for path in root.search_paths("", local) {
        if let Some(el) = root.at_path_mut(&path) {
            edit(el);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::namespace::WML_MAIN;

    fn run_xml(inner: &str) -> XmlDocument {
        let xml = format!(
            r#"<w:r xmlns:w="{WML_MAIN}" xmlns:m="urn:other">{inner}</w:r>"#
        );
        XmlDocument::parse(xml.as_bytes()).unwrap()
    }

    fn leaves(run: &Run<'_>) -> Vec<String> {
        run.element()
            .search(WML_MAIN, TEXT)
            .map(|t| t.text())
            .collect()
    }

    #[test]
    fn test_text_mutation_scenario() {
        let source = r#"<w:rPr><w:i/></w:rPr><w:t xml:space="preserve">Hello </w:t><w:t>World</w:t>"#;

        let mut doc = run_xml(source);
        let mut ids = ObjectIds::new();
        let mut run = Run::new(&mut doc.root, &mut ids);
        assert_eq!(run.text(), "Hello World");
        run.clear();
        assert_eq!(run.text(), "");
        assert_eq!(run.element().elements().count(), 1);
        assert_eq!(run.element().elements().next().unwrap().local_name(), "rPr");

        let mut doc = run_xml(source);
        let mut run = Run::new(&mut doc.root, &mut ids);
        assert!(run.trim_suffix("World"));
        assert_eq!(leaves(&run), ["Hello ", ""]);
        assert_eq!(run.text(), "Hello ");
    }

    #[test]
    fn test_trim_touches_one_leaf() {
        let mut doc = run_xml("<w:t></w:t><w:t>ab</w:t><w:t>ab</w:t><w:t/>");
        let mut ids = ObjectIds::new();
        let mut run = Run::new(&mut doc.root, &mut ids);

        assert!(run.trim_prefix("a"));
        assert_eq!(leaves(&run), ["", "b", "ab", ""]);
        // The first non-empty leaf no longer starts with "a": nothing happens.
        assert!(!run.trim_prefix("a"));
        assert_eq!(leaves(&run), ["", "b", "ab", ""]);

        assert!(run.trim_suffix("b"));
        assert_eq!(leaves(&run), ["", "b", "a", ""]);
    }

    #[test]
    fn test_text_ignores_other_namespaces() {
        let mut doc = run_xml("<w:t>kept</w:t><m:t>skipped</m:t>");
        let mut ids = ObjectIds::new();
        let mut run = Run::new(&mut doc.root, &mut ids);
        assert_eq!(run.text(), "kept");
        assert!(!run.trim_prefix("skip"));
    }

    #[test]
    fn test_add_text() {
        let mut doc = run_xml("<w:rPr/>");
        let mut ids = ObjectIds::new();
        let mut run = Run::new(&mut doc.root, &mut ids);
        run.add_text("plain");
        run.add_text(" padded");

        assert_eq!(run.text(), "plain padded");
        let leaves: Vec<_> = run.element().search(WML_MAIN, TEXT).collect();
        assert_eq!(leaves[0].name().to_string(), "w:t");
        assert_eq!(leaves[0].attribute(XML_NAMESPACE, "space"), None);
        assert_eq!(leaves[1].attribute(XML_NAMESPACE, "space"), Some("preserve"));
        assert!(leaves[1].declarations().is_empty());

        let xml = crate::common::xml::to_xml_string(run.element());
        assert!(xml.ends_with(r#"<w:t>plain</w:t><w:t xml:space="preserve"> padded</w:t></w:r>"#));
    }

    #[test]
    fn test_add_inline_image() {
        let mut doc = run_xml("");
        let mut ids = ObjectIds::new();
        ids.observe(41);
        let mut run = Run::new(&mut doc.root, &mut ids);

        let id = run.add_inline_image("rId5", 9525, 19050).unwrap();
        assert_eq!(id, 42);
        assert_eq!(run.element().elements().count(), 1);

        let drawing = run.element().elements().next().unwrap();
        assert_eq!(drawing.local_name(), "drawing");
        // `w` is already bound by the run.
        assert!(drawing.declarations().iter().all(|b| b.prefix.as_deref() != Some("w")));

        let doc_pr = drawing.search("", OBJECT_PROPERTIES).next().unwrap();
        assert_eq!(doc_pr.attribute("", "id"), Some("42"));
        let blip = drawing.search("", "blip").next().unwrap();
        assert_eq!(blip.attribute(namespace::OFC_RELATIONSHIPS, "embed"), Some("rId5"));
        for local in ["extent", "ext"] {
            let el = drawing.search("", local).next().unwrap();
            assert_eq!(el.attribute("", "cx"), Some("9525"), "{local}");
            assert_eq!(el.attribute("", "cy"), Some("19050"), "{local}");
        }

        assert_eq!(run.add_inline_image("rId5", 1, 1).unwrap(), 43);
        assert_eq!(ids.current(), 43);
    }

    #[test]
    fn test_add_inline_image_without_free_id() {
        let mut doc = run_xml("");
        let mut ids = ObjectIds::new();
        ids.observe(u64::MAX);
        let mut run = Run::new(&mut doc.root, &mut ids);

        let result = run.add_inline_image("rId5", 1, 1);
        assert!(matches!(result, Err(crate::ooxml::opc::OpcError::ObjectIdsExhausted(_))));
        assert_eq!(run.element().elements().count(), 0);
    }

    #[test]
    fn test_paragraph_runs() {
        let xml = format!(
            r#"<w:p xmlns:w="{WML_MAIN}"><w:r><w:t>a</w:t></w:r><w:hyperlink><w:r><w:t>b</w:t></w:r></w:hyperlink></w:p>"#
        );
        let mut doc = XmlDocument::parse(xml.as_bytes()).unwrap();
        let mut ids = ObjectIds::new();
        let mut paragraph = Paragraph::new(&mut doc.root, &mut ids);

        assert_eq!(paragraph.run_count(), 2);
        assert_eq!(paragraph.text(), "ab");
        assert!(paragraph.run(2).is_none());

        paragraph.run(1).unwrap().add_text("c");
        let mut added = paragraph.add_run();
        added.add_text("d");
        assert_eq!(added.element().name().to_string(), "w:r");

        assert_eq!(paragraph.run_count(), 3);
        assert_eq!(paragraph.text(), "abcd");
        let texts: Vec<_> = paragraph.runs().map(|run| run.text()).collect();
        assert_eq!(texts, ["a", "bc", "d"]);
    }

    #[test]
    fn test_for_each_run_mut() {
        let xml = format!(
            r#"<w:p xmlns:w="{WML_MAIN}"><w:r><w:t>a</w:t></w:r><w:hyperlink><w:r><w:t>b</w:t></w:r></w:hyperlink><w:r/></w:p>"#
        );
        let mut doc = XmlDocument::parse(xml.as_bytes()).unwrap();
        let mut ids = ObjectIds::new();
        let mut paragraph = Paragraph::new(&mut doc.root, &mut ids);

        let mut visited = 0;
        paragraph.for_each_run_mut(|mut run| {
            visited += 1;
            run.add_text("!");
        });
        assert_eq!(visited, 3);
        assert_eq!(paragraph.text(), "a!b!!");

        let refs: Vec<_> = paragraph.runs().collect();
        assert_eq!(refs.len(), 3);
        assert!(refs.iter().all(|run| run.text().ends_with('!')));
    }
}
