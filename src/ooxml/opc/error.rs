/// Error types for package operations
use crate::common::xml::XmlError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcError {
    #[error("Package not found: {0}")]
    PackageNotFound(String),

    #[error("Part not found: {0}")]
    PartNotFound(String),

    #[error("ZIP error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Malformed XML in part {path}: {source}")]
    MalformedXml {
        path: String,
        #[source]
        source: XmlError,
    },

    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Object ids exhausted: largest id in use is {0}")]
    ObjectIdsExhausted(u64),

    #[error("Cannot decode media part {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, OpcError>;
