/// Registration of extension defaults in `[Content_Types].xml`.
use crate::common::xml::Node;
use crate::ooxml::docx::template::CONTENT_TYPES_XML;
use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::package::Package;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_PARTNAME, extension};
use tracing::debug;

const DEFAULT: &str = "Default";
const OVERRIDE: &str = "Override";

impl Package {
    /// Make sure a `Default` entry maps `extension` to a content type.
    ///
    /// Extensions compare case-insensitively and an existing entry is left as
    /// is. A new entry goes right after the last `Default`. Returns whether
    /// an entry was added.
    pub fn ensure_default_content_type(
        &mut self,
        extension: &str,
        content_type: &str,
    ) -> Result<bool> {
        let root = &mut self
            .xml_part_or_insert(CONTENT_TYPES_PARTNAME, CONTENT_TYPES_XML)?
            .root;

        let mut last_default = None;
        for (index, child) in root.children().iter().enumerate() {
            let Node::Element(el) = child else {
                continue;
            };
            if el.local_name() != DEFAULT {
                continue;
            }
            let registered = el.attribute("", "Extension").unwrap_or_default();
            if registered.eq_ignore_ascii_case(extension) {
                return Ok(false);
            }
            last_default = Some(index);
        }

        let mut entry = root.new_child(DEFAULT);
        entry.set_attribute("", "Extension", extension);
        entry.set_attribute("", "ContentType", content_type);
        let position = last_default.map_or(0, |index| index + 1);
        root.insert_child(position, Node::Element(entry));

        debug!(extension, content_type, "registered default content type");
        Ok(true)
    }

    /// Content type registered for `extension`, if any.
    pub fn default_content_type(&self, extension: &str) -> Option<&str> {
        self.xml_part(CONTENT_TYPES_PARTNAME)?
            .root
            .elements()
            .filter(|el| el.local_name() == DEFAULT)
            .find(|el| {
                el.attribute("", "Extension")
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
            })
            .and_then(|el| el.attribute("", "ContentType"))
    }

    /// Content type of `partname`.
    ///
    /// An `Override` naming the part wins over the `Default` for its
    /// extension. Override part names carry a leading slash.
    pub fn part_content_type(&self, partname: &str) -> Option<&str> {
        let root = &self.xml_part(CONTENT_TYPES_PARTNAME)?.root;
        root.elements()
            .filter(|el| el.local_name() == OVERRIDE)
            .find(|el| {
                el.attribute("", "PartName").is_some_and(|name| {
                    name.trim_start_matches('/').eq_ignore_ascii_case(partname)
                })
            })
            .and_then(|el| el.attribute("", "ContentType"))
            .or_else(|| self.default_content_type(extension(partname)))
    }
}
