//! Longan - an editable in-memory model of Word (.docx) packages
//!
//! A package is loaded whole: XML parts become mutable trees, every other
//! part is kept as raw bytes. Edits go through managers that keep the package
//! consistent, and the result is written back as a zip archive.
//!
//! # Features
//!
//! - **Lossless round trip**: every part comes back, XML parts rewritten
//!   from their trees, binary parts byte for byte
//! - **Relationships**: find-or-create links with `rId<n>` numbering
//! - **Object ids**: package-wide unique drawing ids
//! - **Media**: image parts with content types and header-only decoding
//! - **Views**: body, headers, paragraphs and runs, with text and inline
//!   picture editing
//!
//! # Example - Editing a DOCX file
//!
//! ```no_run
//! use longan::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pkg = Package::open("document.docx")?;
//!
//! let mut body = pkg.body()?;
//! println!("Document text: {}", body.text());
//! if let Some(mut paragraph) = body.paragraph(0) {
//!     paragraph.add_run().add_text(" (reviewed)");
//! }
//!
//! pkg.save("reviewed.docx")?;
//! # Ok(())
//! # }
//! ```

/// Shared building blocks
///
/// The XML tree used for every parsed part, and unit conversions.
pub mod common;

/// OOXML (Office Open XML) package model and Word views
pub mod ooxml;

// Re-export commonly used types for convenience
pub use ooxml::docx::{Body, Header, Paragraph, ParagraphRef, Run, RunRef, Story};
pub use ooxml::opc::{Compression, MediaFormat, OpcError, Package, Result, SaveOptions};
