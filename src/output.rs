//! CLI output formatting.
//!
//! Format functions return lines and do no I/O; `main` prints them to stdout.
//!
//! ```text
//! Image processed successfully: photo.heic -> photo.jpg
//!     800x512 JPEG (lossy), 84213 bytes
//! ```

use crate::imaging::{self, Format};
use crate::pipeline::Outcome;
use std::path::Path;

/// Confirmation line for a finished run.
pub fn format_success(input: &Path, output: &Path) -> String {
    format!(
        "Image processed successfully: {} -> {}",
        input.display(),
        output.display()
    )
}

/// Confirmation plus an indented detail line (used with `--verbose`).
pub fn format_outcome(input: &Path, output: &Path, outcome: &Outcome) -> Vec<String> {
    vec![
        format_success(input, output),
        format!(
            "    {}x{} {}, {} bytes",
            outcome.width,
            outcome.height,
            describe_format(outcome.format),
            outcome.bytes
        ),
    ]
}

/// One line per registered extension: `ext  FORMAT  decode/encode`, plus the
/// encoder's size limit when it has one.
pub fn format_capabilities() -> Vec<String> {
    imaging::formats::capabilities()
        .map(|cap| {
            let direction = match (cap.can_decode, cap.can_encode) {
                (true, true) => "decode, encode",
                (true, false) => "decode only",
                (false, true) => "encode only",
                (false, false) => "unsupported",
            };
            match cap.encode_limit {
                Some(limit) => format!(
                    "{:<6}{:<11}{direction} (output {limit})",
                    cap.extension, cap.format
                ),
                None => format!("{:<6}{:<11}{direction}", cap.extension, cap.format),
            }
        })
        .collect()
}

/// Detail text for a format, e.g. `JPEG (lossy)`.
pub fn describe_format(format: Format) -> String {
    if format.is_lossy() {
        format!("{format} (lossy)")
    } else {
        format.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_line_names_both_paths() {
        assert_eq!(
            format_success(Path::new("in.png"), Path::new("out/photo.webp")),
            "Image processed successfully: in.png -> out/photo.webp"
        );
    }

    #[test]
    fn outcome_adds_detail_line() {
        let lines = format_outcome(
            Path::new("a.jpg"),
            Path::new("b.png"),
            &Outcome {
                format: Format::Png,
                width: 800,
                height: 512,
                bytes: 1234,
            },
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "    800x512 PNG, 1234 bytes");
    }

    #[test]
    fn capabilities_list_every_extension() {
        let lines = format_capabilities();
        assert!(lines.iter().any(|l| l.starts_with("jpg") && l.ends_with("decode, encode")));
        assert!(lines.iter().any(|l| l.starts_with("jxl") && l.ends_with("decode only")));
        assert!(lines.iter().any(|l| l.starts_with("jp2") && l.ends_with("unsupported")));
    }

    #[test]
    fn capabilities_show_encoder_size_limits() {
        let lines = format_capabilities();
        let ico = lines.iter().find(|l| l.starts_with("ico ")).unwrap();
        assert_eq!(ico, "ico   ICO        decode, encode (output at most 256x256)");
        let png = lines.iter().find(|l| l.starts_with("png ")).unwrap();
        assert!(png.ends_with("decode, encode"));
    }

    #[test]
    fn describe_marks_lossy_formats() {
        assert_eq!(describe_format(Format::WebP), "WebP (lossy)");
        assert_eq!(describe_format(Format::Tiff), "TIFF");
    }
}
