//! Media parts.
//!
//! Images are stored as binary parts under `word/media/`, named `image<N>`
//! with N one past the number of images already there.

use crate::ooxml::opc::constants::content_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::package::Package;
use image::{ImageError, ImageReader};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Directory holding media parts
pub const MEDIA_DIR: &str = "word/media/";

const IMAGE_STEM: &str = "word/media/image";

/// Raster formats accepted as media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaFormat {
    #[default]
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl MediaFormat {
    /// Extension used in the part name, without the leading period.
    pub fn extension(self) -> &'static str {
        match self {
            MediaFormat::Png => "png",
            MediaFormat::Jpeg => "jpeg",
            MediaFormat::Gif => "gif",
            MediaFormat::Bmp => "bmp",
            MediaFormat::Tiff => "tiff",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            MediaFormat::Png => content_type::PNG,
            MediaFormat::Jpeg => content_type::JPEG,
            MediaFormat::Gif => content_type::GIF,
            MediaFormat::Bmp => content_type::BMP,
            MediaFormat::Tiff => content_type::TIFF,
        }
    }

    /// Guess the format from the leading magic bytes.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0x89, b'P', b'N', b'G', ..] => Some(MediaFormat::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(MediaFormat::Jpeg),
            [b'G', b'I', b'F', b'8', ..] => Some(MediaFormat::Gif),
            [b'B', b'M', ..] => Some(MediaFormat::Bmp),
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(MediaFormat::Tiff),
            _ => None,
        }
    }
}

impl Package {
    /// Store PNG bytes as a new media part and return its name, e.g. `image3.png`.
    ///
    /// The index counts existing `word/media/image*` parts, so removing media
    /// can make a later name reuse a lower index. The `png` default content
    /// type is registered if needed.
    pub fn add_media(&mut self, bytes: impl Into<Vec<u8>>) -> Result<String> {
        self.add_media_with_format(bytes, MediaFormat::Png)
    }

    /// Like [`add_media`](Self::add_media), for any [`MediaFormat`].
    pub fn add_media_with_format(
        &mut self,
        bytes: impl Into<Vec<u8>>,
        format: MediaFormat,
    ) -> Result<String> {
        self.ensure_default_content_type(format.extension(), format.content_type())?;

        let index = 1 + self.count_binary_parts_with_prefix(IMAGE_STEM);
        let name = format!("image{index}.{}", format.extension());
        let bytes = bytes.into();
        debug!(media = %name, bytes = bytes.len(), "adding media part");
        self.insert_binary_part(&format!("{MEDIA_DIR}{name}"), bytes);
        Ok(name)
    }

    /// Read an image file and add it as media.
    ///
    /// The format is detected from the file content, falling back to PNG.
    pub fn add_media_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<String> {
        let bytes = std::fs::read(path)?;
        let format = MediaFormat::detect(&bytes).unwrap_or_default();
        self.add_media_with_format(bytes, format)
    }

    /// Pixel width and height of media part `name` (e.g. `image1.png`).
    ///
    /// Only the image header is decoded. The package is never modified.
    pub fn media_dimensions(&self, name: &str) -> Result<(u32, u32)> {
        let partname = format!("{MEDIA_DIR}{name}");
        let bytes = self
            .binary_part(&partname)
            .ok_or_else(|| OpcError::PartNotFound(partname.clone()))?;

        let decode_error = |source: ImageError| OpcError::Decode {
            name: name.to_string(),
            source,
        };
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|err| decode_error(ImageError::IoError(err)))?
            .into_dimensions()
            .map_err(decode_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::fixtures::{minimal_docx, png};
    use crate::ooxml::opc::packuri::CONTENT_TYPES_PARTNAME;

    #[test]
    fn test_media_names_count_up() {
        let mut pkg = Package::from_bytes(&minimal_docx()).unwrap();
        // The fixture already holds word/media/image1.png.
        assert_eq!(pkg.add_media(png(1, 1)).unwrap(), "image2.png");
        assert_eq!(pkg.add_media(png(1, 1)).unwrap(), "image3.png");
        assert!(pkg.binary_part("word/media/image3.png").is_some());
    }

    #[test]
    fn test_media_names_in_empty_package() {
        let mut pkg = Package::new();
        let names: Vec<_> = (0..3).map(|_| pkg.add_media(png(2, 2)).unwrap()).collect();
        assert_eq!(names, ["image1.png", "image2.png", "image3.png"]);
        assert_eq!(pkg.default_content_type("png"), Some(content_type::PNG));

        let png_defaults = pkg
            .xml_part(CONTENT_TYPES_PARTNAME)
            .unwrap()
            .root
            .elements()
            .filter(|el| el.local_name() == "Default")
            .filter(|el| el.attribute("", "Extension") == Some("png"))
            .count();
        assert_eq!(png_defaults, 1);
    }

    #[test]
    fn test_removal_lowers_next_index() {
        let mut pkg = Package::new();
        pkg.add_media(png(1, 1)).unwrap();
        pkg.add_media(png(1, 1)).unwrap();
        assert!(pkg.remove_part("word/media/image1.png"));
        // Two minus one existing, so the name collides with image2.
        assert_eq!(pkg.add_media(png(1, 1)).unwrap(), "image2.png");
    }

    #[test]
    fn test_media_with_format() {
        let mut pkg = Package::new();
        let name = pkg
            .add_media_with_format(vec![0xFF, 0xD8, 0xFF, 0xE0], MediaFormat::Jpeg)
            .unwrap();
        assert_eq!(name, "image1.jpeg");
        assert_eq!(pkg.default_content_type("jpeg"), Some(content_type::JPEG));
    }

    #[test]
    fn test_media_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picture.bin");
        std::fs::write(&path, png(4, 3)).unwrap();

        let mut pkg = Package::new();
        let name = pkg.add_media_from_file(&path).unwrap();
        assert_eq!(name, "image1.png");
        assert_eq!(pkg.media_dimensions(&name).unwrap(), (4, 3));
    }

    #[test]
    fn test_detect() {
        assert_eq!(MediaFormat::detect(&png(1, 1)), Some(MediaFormat::Png));
        assert_eq!(MediaFormat::detect(b"GIF89a"), Some(MediaFormat::Gif));
        assert_eq!(MediaFormat::detect(b"II*\0"), Some(MediaFormat::Tiff));
        assert_eq!(MediaFormat::detect(b"hello"), None);
    }

    #[test]
    fn test_dimensions() {
        let mut pkg = Package::new();
        let name = pkg.add_media(png(17, 5)).unwrap();
        assert_eq!(pkg.media_dimensions(&name).unwrap(), (17, 5));
    }

    #[test]
    fn test_dimensions_of_garbage_is_typed_error() {
        let mut pkg = Package::new();
        let name = pkg.add_media(b"definitely not an image".to_vec()).unwrap();
        let before = pkg.part_names().len();

        let err = pkg.media_dimensions(&name).unwrap_err();
        assert!(matches!(err, OpcError::Decode { name: ref n, .. } if n == &name));
        assert_eq!(pkg.part_names().len(), before);
    }

    #[test]
    fn test_dimensions_of_missing_part() {
        let pkg = Package::new();
        let err = pkg.media_dimensions("image9.png").unwrap_err();
        assert!(matches!(err, OpcError::PartNotFound(_)));
    }
}
