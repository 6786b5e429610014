//! A small mutable XML tree.
//!
//! Office parts are edited in place and written back, so the tree keeps what
//! a round trip needs: declaration order, prefixes, whitespace, comments and
//! processing instructions. Lookups use namespace URIs, never prefixes.
//!
//! ```
//! use longan::common::xml::XmlDocument;
//!
//! let doc = XmlDocument::parse(br#"<w:p xmlns:w="urn:w"><w:r><w:t>Hi</w:t></w:r></w:p>"#)?;
//! let t = doc.root.search("urn:w", "t").next().unwrap();
//! assert_eq!(t.text(), "Hi");
//! # Ok::<(), longan::common::xml::XmlError>(())
//! ```

mod document;
mod element;
mod error;
mod escape;
mod namespace;
mod parser;
mod writer;

pub use document::{Declaration, XmlDocument};
pub use element::{Attribute, Descendants, Element, Node, NodePath};
pub use error::{Result, XmlError};
pub use escape::{escape_attribute, escape_text};
pub use namespace::{Binding, QName, Scope, XML_NAMESPACE};
pub use parser::parse;
pub use writer::to_xml_string;
