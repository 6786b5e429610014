//! Namespace handling for the XML tree.
//!
//! Names are stored lexically (`prefix:local`) so that documents are written
//! back with the prefixes they were read with. Each element additionally
//! carries the [`Scope`] of prefix bindings in effect at that element, which
//! is used to resolve prefixes to namespace URIs.

use std::fmt;

/// The namespace bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A lexical XML name, e.g. `w:p` or `Relationship`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    prefix: Option<String>,
    local: String,
}

impl QName {
    /// Create a name from an optional prefix and a local part.
    pub fn new(prefix: Option<&str>, local: &str) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            local: local.to_string(),
        }
    }

    /// Split a raw `prefix:local` name.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((prefix, local)) => Self::new(Some(prefix), local),
            None => Self::new(None, raw),
        }
    }

    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    #[inline]
    pub fn local(&self) -> &str {
        &self.local
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// A namespace declaration: `xmlns="uri"` (no prefix) or `xmlns:p="uri"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    pub prefix: Option<String>,
    pub uri: String,
}

impl Binding {
    pub fn new(prefix: Option<&str>, uri: &str) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            uri: uri.to_string(),
        }
    }

    /// Parse an attribute key as a namespace declaration, if it is one.
    pub(crate) fn from_attribute(key: &str, value: &str) -> Option<Self> {
        if key == "xmlns" {
            Some(Self::new(None, value))
        } else {
            key.strip_prefix("xmlns:")
                .map(|prefix| Self::new(Some(prefix), value))
        }
    }
}

/// The prefix bindings in effect at some point of a document.
///
/// Later bindings shadow earlier ones with the same prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    bindings: Vec<Binding>,
}

impl Scope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new scope with `declarations` layered on top of this one.
    pub fn with(&self, declarations: &[Binding]) -> Self {
        let mut bindings = self.bindings.clone();
        bindings.extend(declarations.iter().cloned());
        Self { bindings }
    }

    /// Resolve a prefix (`None` for the default namespace) to its URI.
    pub fn resolve(&self, prefix: Option<&str>) -> Option<&str> {
        if prefix == Some("xml") {
            return Some(XML_NAMESPACE);
        }
        self.bindings
            .iter()
            .rev()
            .find(|b| b.prefix.as_deref() == prefix)
            .map(|b| b.uri.as_str())
            // An empty default declaration (`xmlns=""`) undeclares the default namespace.
            .filter(|uri| !(prefix.is_none() && uri.is_empty()))
    }

    /// Find a named prefix currently bound to `uri`.
    ///
    /// The default namespace never applies to attributes, so only prefixed
    /// bindings are considered. Shadowed bindings are skipped.
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        if uri == XML_NAMESPACE {
            return Some("xml");
        }
        self.bindings
            .iter()
            .rev()
            .filter(|b| b.uri == uri)
            .filter_map(|b| b.prefix.as_deref())
            .find(|prefix| self.resolve(Some(prefix)) == Some(uri))
    }

    /// Whether `binding` is already in effect in this scope.
    pub fn declares(&self, binding: &Binding) -> bool {
        self.resolve(binding.prefix.as_deref()) == Some(binding.uri.as_str())
    }
}
