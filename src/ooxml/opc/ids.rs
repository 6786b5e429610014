//! Package-wide drawing object identifiers.
//!
//! Every drawing object carries a `docPr` element whose `id` attribute must be
//! unique across the whole package, not only within its part.

use crate::common::xml::XmlDocument;
use crate::ooxml::opc::error::{OpcError, Result};
use tracing::warn;

/// Local name of the object-properties element holding the id
pub const OBJECT_PROPERTIES: &str = "docPr";

/// Allocator for object identifiers.
///
/// Seeded from the largest id found in the package, then every
/// [`allocate`](Self::allocate) returns a value strictly greater than anything
/// observed or issued before.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectIds {
    current: u64,
}

impl ObjectIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an allocator from the `docPr` ids of `parts`.
    ///
    /// Ids that are not non-negative integers are skipped with a warning.
    pub fn scan<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a XmlDocument)>,
    {
        let mut ids = Self::new();
        for (partname, doc) in parts {
            for props in doc.root.descendants() {
                if props.local_name() != OBJECT_PROPERTIES {
                    continue;
                }
                let Some(raw) = props.attribute("", "id") else {
                    continue;
                };
                match raw.trim().parse::<u64>() {
                    Ok(id) => ids.observe(id),
                    Err(_) => warn!(part = %partname, id = raw, "skipping non-numeric object id"),
                }
            }
        }
        ids
    }

    /// Record an id seen in the package.
    #[inline]
    pub fn observe(&mut self, id: u64) {
        self.current = self.current.max(id);
    }

    /// Issue a fresh id.
    ///
    /// Fails once the largest id in use is `u64::MAX`, leaving the allocator
    /// unchanged.
    #[inline]
    pub fn allocate(&mut self) -> Result<u64> {
        self.current = self
            .current
            .checked_add(1)
            .ok_or(OpcError::ObjectIdsExhausted(self.current))?;
        Ok(self.current)
    }

    /// Largest id observed or issued so far.
    #[inline]
    pub fn current(&self) -> u64 {
        self.current
    }
}
