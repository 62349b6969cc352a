//! # nim
//!
//! Convert an image from one format to another and resize it to a target box
//! in a single step.
//!
//! # Architecture: One Linear Pipeline
//!
//! ```text
//! input file ─→ decode ─→ resize ─→ encode ─→ output file
//! ```
//!
//! Every stage is chosen by looking up a file extension in one static format
//! registry. Adding a codec means adding a row there; nothing else branches on
//! format names.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Format registry, per-format codecs, decode/resize/encode dispatch |
//! | [`pipeline`] | Runs one conversion and writes the output file |
//! | [`config`] | `nim.toml` defaults, validation, and CLI override resolution |
//! | [`error`] | [`ConvertError`](error::ConvertError), the single error type callers see |
//! | [`logging`] | `tracing` subscriber setup for the binary |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Table-Driven Formats
//!
//! Each registry row names its extensions and, per direction, either a codec
//! function or the reason none exists. `--list-formats` and the error messages
//! for decode-only formats both read from that table, so they can't drift.
//!
//! ## Output Exactly Matches the Box
//!
//! Whatever the mode, the output is exactly `width × height`. Fit pads with a
//! solid color, Fill crops from the center, Stretch distorts. Callers never
//! have to re-check dimensions.
//!
//! ## No Partial Files
//!
//! Encoding runs in memory. The output path is created only once encoded bytes
//! exist, and removed again if writing them fails.

pub mod config;
pub mod error;
pub mod imaging;
pub mod logging;
pub mod output;
pub mod pipeline;
