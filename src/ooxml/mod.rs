//! Office Open XML (OOXML) support for Word packages.
//!
//! The module is organized in two layers:
//!
//! 1. **OPC Layer** (`opc`): the package model, relationships, content types,
//!    media and object ids
//! 2. **Word Layer** (`docx`): navigable views over the body and headers
//!
//! # Example: Editing a Word Document
//!
//! ```rust,no_run
//! use longan::ooxml::opc::Package;
//!
//! let mut pkg = Package::open("document.docx")?;
//! println!("{}", pkg.body()?.text());
//!
//! for name in pkg.headers() {
//!     if let Some(mut paragraph) = pkg.header(&name)?.paragraph(0) {
//!         if let Some(mut run) = paragraph.run(0) {
//!             run.trim_prefix("DRAFT ");
//!         }
//!     }
//! }
//! pkg.save("document.docx")?;
//! # Ok::<(), longan::ooxml::opc::OpcError>(())
//! ```
pub mod docx;
pub mod opc;
