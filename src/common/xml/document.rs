use crate::common::xml::element::{Element, Node};
use crate::common::xml::error::Result;
use crate::common::xml::{parser, writer};

/// The `<?xml ...?>` declaration of a document.
///
/// The encoding is not kept: documents are always written as UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub standalone: Option<String>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            standalone: Some("yes".to_string()),
        }
    }
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub declaration: Option<Declaration>,
    /// Comments and processing instructions before the root element.
    pub prolog: Vec<Node>,
    pub root: Element,
    /// Comments and processing instructions after the root element.
    pub epilog: Vec<Node>,
}

impl XmlDocument {
    /// Wrap `root` in a document with a standalone UTF-8 declaration.
    pub fn new(root: Element) -> Self {
        Self {
            declaration: Some(Declaration::default()),
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    /// Parse a document from raw bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        parser::parse(bytes)
    }

    /// Serialize the document as UTF-8.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_xml_string().into_bytes()
    }

    pub fn to_xml_string(&self) -> String {
        writer::write_document(self)
    }
}
