//! Mutable XML element tree.
//!
//! Every element keeps its lexical name next to the namespace URI that name
//! resolved to when the element was read or created, so lookups are by
//! namespace while serialization reproduces the original prefixes.

use crate::common::xml::namespace::{Binding, QName, Scope};
use smallvec::SmallVec;
use std::sync::Arc;

/// Child indices leading from an element down to one of its descendants.
pub type NodePath = SmallVec<[usize; 8]>;

/// A child of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    /// Raw content of a processing instruction, target included.
    ProcessingInstruction(String),
}

impl Node {
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Character data carried by this node, if it is text or CDATA.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) | Node::CData(text) => Some(text),
            _ => None,
        }
    }
}

/// An attribute that is not a namespace declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: QName,
    namespace: Option<String>,
    value: String,
}

impl Attribute {
    pub(crate) fn new(name: QName, namespace: Option<String>, value: String) -> Self {
        Self {
            name,
            namespace,
            value,
        }
    }

    #[inline]
    pub fn name(&self) -> &QName {
        &self.name
    }

    /// Namespace URI, empty for unprefixed attributes.
    #[inline]
    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or_default()
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Attributes match on the exact namespace. Unprefixed attributes live in
    /// no namespace and are selected with `""`.
    #[inline]
    fn matches(&self, namespace: &str, local: &str) -> bool {
        self.name.local() == local && self.namespace() == namespace
    }
}

/// An XML element with its attributes, declarations and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: QName,
    namespace: Option<String>,
    declarations: Vec<Binding>,
    attributes: Vec<Attribute>,
    scope: Arc<Scope>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element with no namespace and an empty scope.
    pub fn new(local: &str) -> Self {
        Self::from_parts(QName::new(None, local), None, Vec::new(), Vec::new(), Arc::default())
    }

    pub(crate) fn from_parts(
        name: QName,
        namespace: Option<String>,
        declarations: Vec<Binding>,
        attributes: Vec<Attribute>,
        scope: Arc<Scope>,
    ) -> Self {
        Self {
            name,
            namespace,
            declarations,
            attributes,
            scope,
            children: Vec::new(),
        }
    }

    /// Create a detached element in this element's namespace and scope.
    ///
    /// The new element shares this element's prefix, so once appended it is
    /// written as e.g. `w:t` under a `w:r`.
    pub fn new_child(&self, local: &str) -> Element {
        Self::from_parts(
            QName::new(self.name.prefix(), local),
            self.namespace.clone(),
            Vec::new(),
            Vec::new(),
            Arc::clone(&self.scope),
        )
    }

    #[inline]
    pub fn name(&self) -> &QName {
        &self.name
    }

    #[inline]
    pub fn local_name(&self) -> &str {
        self.name.local()
    }

    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.name.prefix()
    }

    /// Namespace URI of this element, empty when it has none.
    #[inline]
    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or_default()
    }

    /// Namespace declarations made on this element, in document order.
    #[inline]
    pub fn declarations(&self) -> &[Binding] {
        &self.declarations
    }

    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Prefix bindings in effect at this element, its own included.
    #[inline]
    pub fn scope(&self) -> &Arc<Scope> {
        &self.scope
    }

    /// Whether this element has local name `local` and, unless `namespace`
    /// is empty, namespace URI `namespace`.
    #[inline]
    pub fn matches(&self, namespace: &str, local: &str) -> bool {
        self.name.local() == local && (namespace.is_empty() || self.namespace() == namespace)
    }

    pub fn attribute(&self, namespace: &str, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.matches(namespace, local))
            .map(Attribute::value)
    }

    /// Set an attribute, replacing any existing value.
    ///
    /// A new namespaced attribute reuses a prefix already bound to
    /// `namespace`. When none is in scope a fresh `nsN` prefix is declared on
    /// this element.
    pub fn set_attribute(&mut self, namespace: &str, local: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(attr) = self.attributes.iter_mut().find(|a| a.matches(namespace, local)) {
            attr.value = value;
            return;
        }

        let attr = if namespace.is_empty() {
            Attribute::new(QName::new(None, local), None, value)
        } else {
            let prefix = self.bind_prefix(namespace);
            Attribute::new(
                QName::new(Some(&prefix), local),
                Some(namespace.to_string()),
                value,
            )
        };
        self.attributes.push(attr);
    }

    /// Remove an attribute, returning its value.
    pub fn remove_attribute(&mut self, namespace: &str, local: &str) -> Option<String> {
        let index = self.attributes.iter().position(|a| a.matches(namespace, local))?;
        Some(self.attributes.remove(index).value)
    }

    fn bind_prefix(&mut self, namespace: &str) -> String {
        if let Some(prefix) = self.scope.prefix_for(namespace) {
            return prefix.to_string();
        }
        let prefix = (0..)
            .map(|n| format!("ns{n}"))
            .find(|candidate| self.scope.resolve(Some(candidate.as_str())).is_none())
            .unwrap_or_default();
        let binding = Binding::new(Some(&prefix), namespace);
        self.scope = Arc::new(self.scope.with(std::slice::from_ref(&binding)));
        self.declarations.push(binding);
        prefix
    }

    /// Concatenated character data of the direct children.
    pub fn text(&self) -> String {
        self.children.iter().filter_map(Node::as_text).collect()
    }

    /// Replace the direct character data with `text`.
    ///
    /// The new text takes the place of the first text node, element children
    /// are kept. An empty `text` removes the character data altogether.
    pub fn set_text(&mut self, text: &str) {
        let position = self
            .children
            .iter()
            .position(|n| n.as_text().is_some())
            .unwrap_or(0);
        self.clear_text();
        if !text.is_empty() {
            // Only text at or after `position` was removed.
            self.children.insert(position, Node::Text(text.to_string()));
        }
    }

    /// Drop all direct text and CDATA children.
    pub fn clear_text(&mut self) {
        self.children.retain(|n| n.as_text().is_none());
    }

    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[inline]
    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Append a child node.
    #[inline]
    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Append an element child and return it for further editing.
    pub fn push_element(&mut self, element: Element) -> &mut Element {
        self.children.push(Node::Element(element));
        match self.children.last_mut() {
            Some(Node::Element(el)) => el,
            _ => unreachable!("element was just pushed"),
        }
    }

    /// Insert a child node at `index`, clamped to the number of children.
    pub fn insert_child(&mut self, index: usize, node: Node) {
        let index = index.min(self.children.len());
        self.children.insert(index, node);
    }

    /// Keep only the children for which `keep` returns true.
    pub fn retain_children<F>(&mut self, keep: F)
    where
        F: FnMut(&Node) -> bool,
    {
        self.children.retain(keep);
    }

    /// Direct element children.
    pub fn elements(&self) -> impl Iterator<Item = &Element> + Clone {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    /// All descendant elements in document order, this element excluded.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// Descendants matching `namespace` and `local`, in document order.
    ///
    /// An empty `namespace` matches any namespace. The search is lazy and
    /// the iterator can be cloned to restart from the current position.
    pub fn search<'a>(
        &'a self,
        namespace: &'a str,
        local: &'a str,
    ) -> impl Iterator<Item = &'a Element> + Clone + 'a {
        self.descendants().filter(move |el| el.matches(namespace, local))
    }

    /// Paths to the descendants [`search`](Self::search) would yield.
    pub fn search_paths(&self, namespace: &str, local: &str) -> Vec<NodePath> {
        let mut paths = Vec::new();
        let mut current = NodePath::new();
        collect_paths(self, namespace, local, &mut current, &mut paths);
        paths
    }

    pub fn at_path(&self, path: &[usize]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |el, &index| el.children.get(index)?.as_element())
    }

    pub fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut el = self;
        for &index in path {
            el = el.children.get_mut(index)?.as_element_mut()?;
        }
        Some(el)
    }

    /// Re-root this subtree under `outer`.
    ///
    /// Declarations that `outer` already makes are dropped from this element,
    /// and the scopes of the whole subtree are rebuilt on top of `outer`.
    pub fn join_scope(&mut self, outer: &Arc<Scope>) {
        self.declarations.retain(|b| !outer.declares(b));
        self.rescope(outer);
    }

    fn rescope(&mut self, parent: &Arc<Scope>) {
        self.scope = if self.declarations.is_empty() {
            Arc::clone(parent)
        } else {
            Arc::new(parent.with(&self.declarations))
        };
        let scope = Arc::clone(&self.scope);
        for child in self.elements_mut() {
            child.rescope(&scope);
        }
    }
}

fn collect_paths(
    el: &Element,
    namespace: &str,
    local: &str,
    current: &mut NodePath,
    out: &mut Vec<NodePath>,
) {
    for (index, child) in el.children.iter().enumerate() {
        if let Node::Element(child) = child {
            current.push(index);
            if child.matches(namespace, local) {
                out.push(current.clone());
            }
            collect_paths(child, namespace, local, current, out);
            current.pop();
        }
    }
}

/// Depth-first iterator over descendant elements.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<&'a Element> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(Node::Element(el)) => {
                    self.stack.push(el.children.iter());
                    return Some(el);
                },
                Some(_) => {},
                None => {
                    self.stack.pop();
                },
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::parse;

    const DOC: &str = r#"<w:document xmlns:w="urn:w" xmlns:v="urn:v"><w:body><w:p><w:r><w:t>a</w:t></w:r></w:p><v:p/><w:tbl><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl></w:body></w:document>"#;

    #[test]
    fn test_search_is_depth_first_and_excludes_root() {
        let doc = parse(DOC.as_bytes()).unwrap();
        let body = doc.root.elements().next().unwrap();

        let found: Vec<_> = body.search("urn:w", "p").collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].search("", "t").count(), 1);

        // Empty namespace is a wildcard.
        assert_eq!(body.search("", "p").count(), 3);
        assert_eq!(doc.root.search("urn:w", "document").count(), 0);
    }

    #[test]
    fn test_search_paths_agree_with_search() {
        let doc = parse(DOC.as_bytes()).unwrap();
        let paths = doc.root.search_paths("urn:w", "p");
        let found: Vec<_> = doc.root.search("urn:w", "p").collect();
        assert_eq!(paths.len(), found.len());
        for (path, el) in paths.iter().zip(found) {
            assert!(std::ptr::eq(doc.root.at_path(path).unwrap(), el));
        }
    }

    #[test]
    fn test_at_path_mut_edits_in_place() {
        let mut doc = parse(DOC.as_bytes()).unwrap();
        let path = doc.root.search_paths("urn:w", "t").remove(0);
        doc.root.at_path_mut(&path).unwrap().set_text("b");
        assert_eq!(doc.root.search("", "t").next().unwrap().text(), "b");
        assert!(doc.root.at_path_mut(&[9, 9]).is_none());
    }

    #[test]
    fn test_set_attribute_reuses_bound_prefix() {
        let doc = parse(DOC.as_bytes()).unwrap();
        let mut p = doc.root.search("urn:w", "p").next().unwrap().clone();
        p.set_attribute("urn:w", "rsid", "00AB");
        assert_eq!(p.attributes()[0].name().to_string(), "w:rsid");
        assert!(p.declarations().is_empty());

        p.set_attribute("urn:new", "x", "1");
        assert_eq!(p.attributes()[1].name().to_string(), "ns0:x");
        assert_eq!(p.declarations(), &[Binding::new(Some("ns0"), "urn:new")]);
        assert_eq!(p.attribute("urn:new", "x"), Some("1"));

        p.set_attribute("urn:new", "x", "2");
        assert_eq!(p.attributes().len(), 2);
        assert_eq!(p.remove_attribute("urn:new", "x").as_deref(), Some("2"));
    }

    #[test]
    fn test_set_text_keeps_element_children() {
        let mut el = Element::new("r");
        el.push(Node::Text("x".into()));
        el.push_element(Element::new("rPr"));
        el.push(Node::Text("y".into()));

        el.set_text("z");
        assert_eq!(el.text(), "z");
        assert_eq!(el.children().len(), 2);
        assert!(matches!(&el.children()[0], Node::Text(t) if t == "z"));

        el.set_text("");
        assert_eq!(el.children().len(), 1);
    }

    #[test]
    fn test_new_child_inherits_prefix() {
        let doc = parse(DOC.as_bytes()).unwrap();
        let r = doc.root.search("urn:w", "r").next().unwrap();
        let t = r.new_child("t");
        assert_eq!(t.name().to_string(), "w:t");
        assert_eq!(t.namespace(), "urn:w");
    }

    #[test]
    fn test_join_scope_drops_redundant_declarations() {
        let outer = Arc::new(Scope::new().with(&[Binding::new(Some("w"), "urn:w")]));
        let fragment =
            parse(br#"<w:x xmlns:w="urn:w" xmlns:a="urn:a"><a:y/></w:x>"#).unwrap();
        let mut root = fragment.root;
        root.join_scope(&outer);

        assert_eq!(root.declarations(), &[Binding::new(Some("a"), "urn:a")]);
        let child = root.elements().next().unwrap();
        assert_eq!(child.scope().resolve(Some("w")), Some("urn:w"));
        assert_eq!(child.scope().resolve(Some("a")), Some("urn:a"));
    }
}
