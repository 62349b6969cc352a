//! JPEG XL decoding through `jxl-oxide`'s `image` integration.

use crate::error::CodecError;
use image::DynamicImage;
use jxl_oxide::integration::JxlDecoder;
use std::fs::File;
use std::io::BufReader;

pub fn decode(reader: BufReader<File>) -> Result<DynamicImage, CodecError> {
    let decoder = JxlDecoder::new(reader).map_err(|e| e.to_string())?;
    Ok(DynamicImage::from_decoder(decoder)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{self, ProcessOptions, ResizeMode};
    use image::GenericImageView;

    /// Bare 240x135 JPEG XL codestream (no container box).
    const TINY_JXL: [u8; 42] = [
        0xff, 0x0a, 0x30, 0x54, 0x10, 0x09, 0x08, 0x06, 0x01, 0x00, 0x78, 0x00, 0x4b, 0x38,
        0x41, 0x3c, 0xb6, 0x3a, 0x51, 0xfe, 0x00, 0x47, 0x1e, 0xa0, 0x85, 0xb8, 0x27, 0x1a,
        0x48, 0x45, 0x84, 0x1b, 0x71, 0x4f, 0xa8, 0x3e, 0x8e, 0x30, 0x03, 0x92, 0x84, 0x01,
    ];

    #[test]
    fn decodes_codestream_through_registry() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("art.JXL");
        std::fs::write(&path, TINY_JXL).unwrap();

        let decoded = imaging::decode(&path).unwrap();
        assert_eq!(decoded.dimensions(), (240, 135));
    }

    #[test]
    fn converts_to_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let input = tmp.path().join("art.jxl");
        let output = tmp.path().join("art.png");
        std::fs::write(&input, TINY_JXL).unwrap();

        let outcome = crate::pipeline::process_image(
            &input,
            &output,
            &ProcessOptions::new(120, 120, ResizeMode::Fit),
        )
        .unwrap();
        assert_eq!((outcome.width, outcome.height), (120, 120));
        assert_eq!(image::open(&output).unwrap().dimensions(), (120, 120));
    }

    #[test]
    fn rejects_non_jxl_data() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("fake.jxl");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nnot really").unwrap();
        let reader = BufReader::new(File::open(&path).unwrap());
        assert!(decode(reader).is_err());
    }
}
