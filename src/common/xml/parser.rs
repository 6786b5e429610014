//! Event-driven construction of [`XmlDocument`] trees on top of `quick-xml`.

use crate::common::xml::document::{Declaration, XmlDocument};
use crate::common::xml::element::{Attribute, Element, Node};
use crate::common::xml::error::{Result, XmlError};
use crate::common::xml::namespace::{Binding, QName, Scope};
use quick_xml::Reader;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use std::borrow::Cow;
use std::sync::Arc;

/// Parse a complete document.
///
/// Whitespace is kept as is. Entity and character references are resolved
/// into the surrounding text. Comments and processing instructions outside
/// the root are kept in the prolog or epilog, a doctype is dropped.
pub fn parse(bytes: &[u8]) -> Result<XmlDocument> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();

    let mut declaration = None;
    let mut prolog = Vec::new();
    let mut epilog = Vec::new();
    let mut root: Option<Element> = None;
    let mut stack: Vec<Element> = Vec::new();
    let empty_scope = Arc::new(Scope::new());

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Decl(ref e) => declaration = Some(read_declaration(e)?),
            Event::Start(ref e) => {
                let scope = stack.last().map_or(&empty_scope, |parent| parent.scope());
                let element = open_element(e, scope)?;
                stack.push(element);
            },
            Event::Empty(ref e) => {
                let scope = stack.last().map_or(&empty_scope, |parent| parent.scope());
                let element = open_element(e, scope)?;
                close_element(element, &mut stack, &mut root)?;
            },
            Event::End(ref e) => {
                let element = stack.pop().ok_or_else(|| {
                    XmlError::UnexpectedEnd(String::from_utf8_lossy(e.name().as_ref()).into_owned())
                })?;
                close_element(element, &mut stack, &mut root)?;
            },
            Event::Text(ref t) => {
                if let Some(current) = stack.last_mut() {
                    let raw = std::str::from_utf8(t)?;
                    push_text(current, &normalize_line_ends(raw));
                }
            },
            Event::GeneralRef(ref r) => {
                if let Some(current) = stack.last_mut() {
                    let name = std::str::from_utf8(r)?;
                    push_text(current, &resolve_reference(name)?);
                }
            },
            Event::CData(ref c) => {
                if let Some(current) = stack.last_mut() {
                    let text = std::str::from_utf8(c)?.to_string();
                    current.push(Node::CData(text));
                }
            },
            Event::Comment(ref c) => {
                let node = Node::Comment(std::str::from_utf8(c)?.to_string());
                place_misc(node, &mut stack, &root, &mut prolog, &mut epilog);
            },
            Event::PI(ref pi) => {
                let node = Node::ProcessingInstruction(std::str::from_utf8(pi)?.to_string());
                place_misc(node, &mut stack, &root, &mut prolog, &mut epilog);
            },
            Event::Eof => break,
            // Doctype
            _ => {},
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Syntax(format!("unclosed element <{}>", open.name())));
    }
    let root = root.ok_or(XmlError::MissingRoot)?;
    Ok(XmlDocument {
        declaration,
        prolog,
        root,
        epilog,
    })
}

fn read_declaration(decl: &BytesDecl<'_>) -> Result<Declaration> {
    let version = std::str::from_utf8(&decl.version()?)?.to_string();
    let standalone = match decl.standalone() {
        Some(value) => Some(std::str::from_utf8(&value?)?.to_string()),
        None => None,
    };
    Ok(Declaration {
        version,
        standalone,
    })
}

fn open_element(start: &BytesStart<'_>, parent_scope: &Arc<Scope>) -> Result<Element> {
    let name = QName::parse(std::str::from_utf8(start.name().as_ref())?);

    let mut declarations = Vec::new();
    let mut raw_attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attribute_value(&attr.value)?;
        match Binding::from_attribute(key, &value) {
            Some(binding) => declarations.push(binding),
            None => raw_attributes.push((QName::parse(key), value)),
        }
    }

    let scope = if declarations.is_empty() {
        Arc::clone(parent_scope)
    } else {
        Arc::new(parent_scope.with(&declarations))
    };

    let namespace = match name.prefix() {
        Some(prefix) => Some(resolve_prefix(&scope, prefix)?),
        None => scope.resolve(None).map(str::to_string),
    };

    let attributes = raw_attributes
        .into_iter()
        .map(|(name, value)| {
            let namespace = name
                .prefix()
                .map(|prefix| resolve_prefix(&scope, prefix))
                .transpose()?;
            Ok(Attribute::new(name, namespace, value))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Element::from_parts(name, namespace, declarations, attributes, scope))
}

fn resolve_prefix(scope: &Scope, prefix: &str) -> Result<String> {
    scope
        .resolve(Some(prefix))
        .map(str::to_string)
        .ok_or_else(|| XmlError::UnboundPrefix(prefix.to_string()))
}

fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.push(Node::Element(element)),
        None if root.is_some() => return Err(XmlError::MultipleRoots),
        None => *root = Some(element),
    }
    Ok(())
}

fn place_misc(
    node: Node,
    stack: &mut [Element],
    root: &Option<Element>,
    prolog: &mut Vec<Node>,
    epilog: &mut Vec<Node>,
) {
    match stack.last_mut() {
        Some(current) => current.push(node),
        None if root.is_some() => epilog.push(node),
        None => prolog.push(node),
    }
}

/// Append character data, merging with a preceding text node.
fn push_text(element: &mut Element, text: &str) {
    if text.is_empty() {
        return;
    }
    match element.children_mut().last_mut() {
        Some(Node::Text(existing)) => existing.push_str(text),
        _ => element.push(Node::Text(text.to_string())),
    }
}

/// Literal `\r\n` and lone `\r` in character data read as `\n`.
fn normalize_line_ends(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Attribute value normalization: literal whitespace characters become
/// spaces, then references are resolved.
fn attribute_value(raw: &[u8]) -> Result<String> {
    let raw = std::str::from_utf8(raw)?;
    let normalized: Cow<'_, str> = if raw.contains(['\t', '\n', '\r']) {
        Cow::Owned(raw.replace("\r\n", " ").replace(['\t', '\n', '\r'], " "))
    } else {
        Cow::Borrowed(raw)
    };
    Ok(quick_xml::escape::unescape(&normalized)?.into_owned())
}

/// Resolve the name of a `&name;` reference.
fn resolve_reference(name: &str) -> Result<String> {
    let resolved = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok()
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok()
            } else {
                None
            };
            code.and_then(char::from_u32)
                .ok_or_else(|| XmlError::UnknownEntity(name.to_string()))?
        },
    };
    Ok(resolved.to_string())
}
