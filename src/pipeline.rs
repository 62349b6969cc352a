//! Pipeline orchestrator: decode → resize → encode → write.
//!
//! A run is strictly linear. The first failing stage ends it and its error is
//! returned as-is; nothing is retried.
//!
//! ```text
//! Idle → Decoding → Resizing → Encoding → Done
//!            └──────────┴──────────┴────→ Failed
//! ```
//!
//! ## Output file handling
//!
//! Encoding happens entirely in memory, so the output path is only created
//! once a complete encoded file exists. Codec failures and decode-only output
//! formats therefore never touch the disk. If writing the bytes fails midway,
//! the truncated file is removed before the error is returned.

use crate::error::ConvertError;
use crate::imaging::{self, Format, ProcessOptions};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info_span, warn};

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub format: Format,
    /// Dimensions stored in the output file.
    pub width: u32,
    pub height: u32,
    /// Size of the written file in bytes.
    pub bytes: usize,
}

/// Convert `input` into `output` according to `options`.
pub fn process_image(
    input: &Path,
    output: &Path,
    options: &ProcessOptions,
) -> Result<Outcome, ConvertError> {
    let _span = info_span!("process", input = %input.display(), output = %output.display())
        .entered();

    options.validate()?;
    // Resolved up front so an unknown output format fails before decoding.
    let format = imaging::resolve_output_format(options.output_format.as_deref(), output)?;
    debug!(%format, "output format resolved");

    let decoded = imaging::decode(input)?;
    let resized = imaging::resize(decoded, options);
    let encoded = imaging::encode(&resized, format, options.quality)?;
    write_output(output, &encoded.bytes)?;

    Ok(Outcome {
        format,
        width: encoded.width,
        height: encoded.height,
        bytes: encoded.bytes.len(),
    })
}

/// Write the encoded file, removing it again if the write does not complete.
fn write_output(path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    let mut file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
    let written = file.write_all(bytes).and_then(|()| file.sync_all());
    drop(file);

    if let Err(e) = written {
        if let Err(cleanup) = std::fs::remove_file(path) {
            warn!(error = %cleanup, "could not remove partial output {}", path.display());
        } else {
            warn!("removed partial output {}", path.display());
        }
        return Err(ConvertError::io(path, e));
    }
    debug!(bytes = bytes.len(), "wrote {}", path.display());
    Ok(())
}
