/// Relationship parts.
///
/// Each part may own a companion `_rels/<name>.rels` part listing the
/// targets it refers to. Links are created lazily, deduplicated by target and
/// numbered `rId<n>` after the largest number in use.
use crate::common::xml::Element;
use crate::ooxml::docx::template::RELATIONSHIPS_XML;
use crate::ooxml::opc::constants::{relationship_type, target_mode};
use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::package::Package;
use crate::ooxml::opc::packuri::rels_partname;
use tracing::debug;

/// Prefix of relationship ids, e.g. `rId1`
pub const REL_ID_PREFIX: &str = "rId";

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part reference relative to the source or an external URL
    target_ref: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    fn from_element(element: &Element) -> Self {
        let attr = |name: &str| element.attribute("", name).unwrap_or_default().to_string();
        Self {
            r_id: attr("Id"),
            reltype: attr("Type"),
            target_ref: attr("Target"),
            is_external: element.attribute("", "TargetMode") == Some(target_mode::EXTERNAL),
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }
}

/// Numeric part of an `rId<n>` id.
fn rel_id_number(r_id: &str) -> Option<u64> {
    r_id.strip_prefix(REL_ID_PREFIX)?.parse().ok()
}

impl Package {
    /// Link `owner` to an image at `target`, returning the relationship id.
    ///
    /// See [`link_target_with_type`](Self::link_target_with_type).
    pub fn link_target(&mut self, owner: &str, target: &str) -> Result<String> {
        self.link_target_with_type(owner, target, relationship_type::IMAGE)
    }

    /// Link `owner` to `target` with relationship type `reltype`.
    ///
    /// The relationship part of `owner` is created when missing. If a
    /// relationship to `target` already exists its id is returned unchanged,
    /// whatever its type. Otherwise a new one is appended with id
    /// `rId<max + 1>`. Absolute URL targets are marked external.
    pub fn link_target_with_type(
        &mut self,
        owner: &str,
        target: &str,
        reltype: &str,
    ) -> Result<String> {
        let rels_name = rels_partname(owner);
        let root = &mut self.xml_part_or_insert(&rels_name, RELATIONSHIPS_XML)?.root;

        let mut max_id = 0;
        for rel in root.elements() {
            let r_id = rel.attribute("", "Id").unwrap_or_default();
            if rel.attribute("", "Target") == Some(target) {
                return Ok(r_id.to_string());
            }
            if let Some(n) = rel_id_number(r_id) {
                max_id = max_id.max(n);
            }
        }

        let r_id = format!("{REL_ID_PREFIX}{}", max_id + 1);
        let mut rel = root.new_child("Relationship");
        rel.set_attribute("", "Id", r_id.as_str());
        rel.set_attribute("", "Type", reltype);
        rel.set_attribute("", "Target", target);
        if target.contains("://") {
            rel.set_attribute("", "TargetMode", target_mode::EXTERNAL);
        }
        root.push_element(rel);

        debug!(part = %rels_name, r_id = %r_id, target, "added relationship");
        Ok(r_id)
    }

    /// Relationships owned by `owner`, in document order.
    ///
    /// Empty when the part has no relationship part.
    pub fn relationships(&self, owner: &str) -> Vec<Relationship> {
        self.xml_part(&rels_partname(owner))
            .map(|doc| doc.root.elements().map(Relationship::from_element).collect())
            .unwrap_or_default()
    }
}
