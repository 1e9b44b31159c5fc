// SPDX-License-Identifier: MPL-2.0
//! MIME type detection for candidate images.

use image_rs::{ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// MIME type given to payloads that are neither named nor recognized as an image.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// MIME type assumed for downloaded examples that carry no usable `Content-Type`.
pub const DEFAULT_DOWNLOAD_MIME: &str = "image/jpeg";

/// Extensions offered by the file dialog filter.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff", "ico",
];

/// Returns the MIME type implied by the file extension, if it names an image format.
pub fn from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?;
    ImageFormat::from_extension(ext).map(|format| format.to_mime_type())
}

/// Returns the MIME type recognized from the leading bytes.
pub fn sniff(bytes: &[u8]) -> Option<&'static str> {
    image_rs::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type())
}

/// Declared MIME type for a file: extension first, then content.
pub fn detect(path: &Path, bytes: &[u8]) -> String {
    from_extension(path)
        .or_else(|| sniff(bytes))
        .unwrap_or(FALLBACK_MIME)
        .to_string()
}

/// `true` for any `image/<subtype>` MIME type.
pub fn is_image(mime: &str) -> bool {
    let mime = mime.trim();
    mime.get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
        && mime.len() > 6
}

/// Reads the pixel dimensions from the image header without decoding pixels.
pub fn header_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn dialog_extensions_are_images() {
        for ext in IMAGE_EXTENSIONS {
            let name = format!("file.{}", ext);
            assert!(from_extension(Path::new(&name)).is_some_and(is_image), "{}", ext);
        }
    }

    #[test]
    fn extension_wins_over_content() {
        assert_eq!(detect(Path::new("photo.JPG"), b"plain text"), "image/jpeg");
        assert_eq!(detect(Path::new("scan.webp"), b""), "image/webp");
    }

    #[test]
    fn unknown_extension_is_sniffed() {
        assert_eq!(detect(Path::new("upload.bin"), PNG_SIGNATURE), "image/png");
        assert_eq!(detect(Path::new("no_extension"), PNG_SIGNATURE), "image/png");
    }

    #[test]
    fn unrecognized_payload_gets_fallback() {
        assert_eq!(detect(Path::new("notes.txt"), b"hello"), FALLBACK_MIME);
    }

    #[test]
    fn image_mime_check() {
        assert!(is_image("image/png"));
        assert!(is_image("IMAGE/JPEG"));
        assert!(!is_image("image/"));
        assert!(!is_image("text/plain"));
        assert!(!is_image(FALLBACK_MIME));
        assert!(!is_image(""));
    }

    #[test]
    fn reads_header_dimensions() {
        let mut bytes = Vec::new();
        image_rs::RgbImage::new(3, 2)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        assert_eq!(header_dimensions(&bytes), Some((3, 2)));
        assert_eq!(header_dimensions(b"garbage"), None);
    }
}
