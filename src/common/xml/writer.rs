//! Deterministic serialization of XML trees.
//!
//! Output mirrors the tree exactly: namespace declarations are written before
//! attributes on the element that made them, prefixes are kept and elements
//! without children are closed with `/>`.

use crate::common::xml::document::XmlDocument;
use crate::common::xml::element::{Element, Node};
use crate::common::xml::escape::{escape_attribute, escape_text};

pub(crate) fn write_document(doc: &XmlDocument) -> String {
    let mut out = String::with_capacity(estimated_len(&doc.root) + 64);
    if let Some(decl) = &doc.declaration {
        out.push_str("<?xml version=\"");
        out.push_str(&escape_attribute(&decl.version));
        out.push_str("\" encoding=\"UTF-8\"");
        if let Some(standalone) = &decl.standalone {
            out.push_str(" standalone=\"");
            out.push_str(&escape_attribute(standalone));
            out.push('"');
        }
        out.push_str("?>\r\n");
    }
    for node in &doc.prolog {
        write_node(node, &mut out);
    }
    write_element(&doc.root, &mut out);
    for node in &doc.epilog {
        write_node(node, &mut out);
    }
    out
}

/// Serialize a single element and its subtree, without declaration.
pub fn to_xml_string(element: &Element) -> String {
    let mut out = String::with_capacity(estimated_len(element));
    write_element(element, &mut out);
    out
}

fn write_element(element: &Element, out: &mut String) {
    let name = element.name().to_string();
    out.push('<');
    out.push_str(&name);

    for binding in element.declarations() {
        match &binding.prefix {
            Some(prefix) => {
                out.push_str(" xmlns:");
                out.push_str(prefix);
            },
            None => out.push_str(" xmlns"),
        }
        out.push_str("=\"");
        out.push_str(&escape_attribute(&binding.uri));
        out.push('"');
    }

    for attr in element.attributes() {
        out.push(' ');
        out.push_str(&attr.name().to_string());
        out.push_str("=\"");
        out.push_str(&escape_attribute(attr.value()));
        out.push('"');
    }

    if element.children().is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in element.children() {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&name);
    out.push('>');
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(el) => write_element(el, out),
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::CData(text) => {
            // `]]>` cannot appear inside a CDATA section, split it.
            out.push_str("<![CDATA[");
            out.push_str(&text.replace("]]>", "]]]]><![CDATA[>"));
            out.push_str("]]>");
        },
        Node::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        },
        Node::ProcessingInstruction(content) => {
            out.push_str("<?");
            out.push_str(content);
            out.push_str("?>");
        },
    }
}

fn estimated_len(element: &Element) -> usize {
    let own = element.local_name().len() * 2
        + 8
        + element
            .attributes()
            .iter()
            .map(|a| a.name().local().len() + a.value().len() + 8)
            .sum::<usize>();
    own + element
        .children()
        .iter()
        .map(|child| match child {
            Node::Element(el) => estimated_len(el),
            Node::Text(t) | Node::CData(t) | Node::Comment(t) | Node::ProcessingInstruction(t) => {
                t.len()
            },
        })
        .sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::parse;

    #[test]
    fn test_writes_declarations_before_attributes() {
        let doc = parse(br#"<r:x b="2" xmlns:r="urn:r" a="1"><y/></r:x>"#).unwrap();
        assert_eq!(
            to_xml_string(&doc.root),
            r#"<r:x xmlns:r="urn:r" b="2" a="1"><y/></r:x>"#
        );
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let doc = parse(br#"<a v="&quot;&lt;">1 &lt; 2 &amp; "3"</a>"#).unwrap();
        assert_eq!(
            to_xml_string(&doc.root),
            r#"<a v="&quot;&lt;">1 &lt; 2 &amp; "3"</a>"#
        );
    }

    #[test]
    fn test_writes_misc_nodes() {
        let doc = parse(b"<a><!--c--><?pi data?><![CDATA[x]]></a>").unwrap();
        assert_eq!(
            to_xml_string(&doc.root),
            "<a><!--c--><?pi data?><![CDATA[x]]></a>"
        );
    }

    #[test]
    fn test_empty_element_form() {
        let doc = parse(b"<a></a>").unwrap();
        assert_eq!(to_xml_string(&doc.root), "<a/>");
    }
}
