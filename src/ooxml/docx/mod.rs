/// Word (.docx) document views.
///
/// Thin, namespace-aware accessors over the parsed parts of a
/// [`Package`](crate::ooxml::opc::Package):
/// - `Story`: the document body or a header (`Body`, `Header`)
/// - `Paragraph`: a paragraph with runs
/// - `Run`: a text run, which can also receive inline pictures
///
/// # Example
///
/// ```rust,no_run
/// use longan::common::unit::px_to_emu;
/// use longan::ooxml::opc::Package;
///
/// let mut pkg = Package::open("document.docx")?;
/// let image = pkg.add_media_from_file("logo.png")?;
/// let (width, height) = pkg.media_dimensions(&image)?;
///
/// let mut body = pkg.body()?;
/// let r_id = body.link_image(&image)?;
/// if let Some(mut paragraph) = body.paragraph(0) {
///     paragraph
///         .add_run()
///         .add_inline_image(&r_id, px_to_emu(width), px_to_emu(height))?;
/// }
/// pkg.save("document.docx")?;
/// # Ok::<(), longan::ooxml::opc::OpcError>(())
/// ```
pub mod paragraph;
pub mod story;
pub mod template;

pub use paragraph::{Paragraph, ParagraphRef, Run, RunRef};
pub use story::{Body, DOCUMENT_PARTNAME, Header, Story};
