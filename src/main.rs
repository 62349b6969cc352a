use clap::Parser;
use nim::config::{self, Overrides};
use nim::error::ConvertError;
use nim::imaging::{PadColor, ResizeMode, Size};
use nim::{logging, output, pipeline};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "nim")]
#[command(version)]
#[command(about = "Convert and resize images between formats")]
#[command(long_about = "\
Convert and resize images between formats

Input and output may be given as flags or positionally. A single positional
argument is taken as the output (the input then comes from --input).

Resize modes:
  fit      scale to fit inside WIDTHxHEIGHT, pad the rest with --pad-color
  fill     scale to cover WIDTHxHEIGHT, crop the overflow from the center
  stretch  scale each axis to exactly WIDTHxHEIGHT

Formats (run --list-formats for the full matrix):
  read + write  jpg, png, gif, bmp, tiff, webp, avif, ico, icns
  read only     heic/heif, jxl

ICO output is limited to 256x256; pass e.g. -s 256x256. ICNS output is
scaled to the largest standard icon square (16-1024 px) that fits.")]
#[command(after_help = "\
Examples:
  nim -i input.jpg -o output.png -w 800 -H 600
  nim -i input.png -o output.jpg -s 1024x768 -q 90
  nim -i input.gif -o output.webp -s 300x300 -m stretch -p \"#FF0000\"
  nim input.jpg output.png")]
struct Cli {
    /// Input and/or output file
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Input image file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output image file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target width [default: 800]
    #[arg(short, long)]
    width: Option<u32>,

    /// Target height [default: 512]
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Target size as WIDTHxHEIGHT; overrides --width and --height
    #[arg(short, long, value_parser = parse_arg::<Size>)]
    size: Option<Size>,

    /// Resize mode: fit, fill or stretch [default: fit]
    #[arg(short, long, value_parser = parse_arg::<ResizeMode>)]
    mode: Option<ResizeMode>,

    /// Output quality 1-100, lossy formats only [default: 85]
    #[arg(short, long)]
    quality: Option<u32>,

    /// Output format (jpg, png, webp, ...) [default: from output extension]
    #[arg(short, long)]
    format: Option<String>,

    /// Padding color for fit mode, as #RRGGBB [default: #FFFFFF]
    #[arg(short, long, value_parser = parse_arg::<PadColor>)]
    pad_color: Option<PadColor>,

    /// Config file with default options [default: ./nim.toml if present]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a stock nim.toml with all options documented
    #[arg(long)]
    gen_config: bool,

    /// Print the format support matrix
    #[arg(long)]
    list_formats: bool,

    /// Log each pipeline stage to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

/// Adapts the crate's `FromStr` impls to clap's value parser signature.
fn parse_arg<T>(value: &str) -> Result<T, String>
where
    T: std::str::FromStr<Err = ConvertError>,
{
    value.parse().map_err(|e: ConvertError| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json_logs);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "run failed");
            eprintln!("Error: {e}");
            // Each variant's message already embeds its direct source
            let mut source = std::error::Error::source(&e).and_then(|s| s.source());
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ConvertError> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }
    if cli.list_formats {
        for line in output::format_capabilities() {
            println!("{line}");
        }
        return Ok(());
    }

    let (input, output_path) = resolve_paths(cli.input, cli.output, cli.files)?;
    let cwd = std::env::current_dir().map_err(|source| ConvertError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    let defaults = config::discover_config(cli.config.as_deref(), &cwd)?;
    let options = defaults.resolve(&Overrides {
        width: cli.width,
        height: cli.height,
        size: cli.size,
        mode: cli.mode,
        quality: cli.quality,
        format: cli.format,
        pad_color: cli.pad_color,
    })?;
    tracing::debug!(?options, "resolved options");

    let outcome = pipeline::process_image(&input, &output_path, &options)?;

    if cli.verbose {
        for line in output::format_outcome(&input, &output_path, &outcome) {
            println!("{line}");
        }
    } else {
        println!("{}", output::format_success(&input, &output_path));
    }
    Ok(())
}

/// Combine `--input`/`--output` with positional arguments.
///
/// Two positionals are input and output; one is the output only.
fn resolve_paths(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    files: Vec<PathBuf>,
) -> Result<(PathBuf, PathBuf), ConvertError> {
    let (input, output) = match <[PathBuf; 2]>::try_from(files) {
        Ok([first, second]) => (Some(first), Some(second)),
        Err(files) => match files.len() {
            0 => (input, output),
            1 => (input, files.into_iter().next()),
            _ => {
                return Err(ConvertError::InvalidArgument(
                    "too many arguments: expected at most 2 (input and output files)".into(),
                ));
            }
        },
    };
    let input = input.ok_or_else(|| {
        ConvertError::InvalidArgument("input file is required".into())
    })?;
    let output = output.ok_or_else(|| {
        ConvertError::InvalidArgument("output file is required".into())
    })?;
    Ok((input, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn two_positionals_are_input_and_output() {
        let (i, o) = resolve_paths(None, None, vec![p("a.jpg"), p("b.png")]).unwrap();
        assert_eq!((i, o), (p("a.jpg"), p("b.png")));
    }

    #[test]
    fn one_positional_is_output() {
        let (i, o) = resolve_paths(Some(p("a.jpg")), None, vec![p("b.png")]).unwrap();
        assert_eq!((i, o), (p("a.jpg"), p("b.png")));
    }

    #[test]
    fn flags_alone_work() {
        let (i, o) = resolve_paths(Some(p("a.jpg")), Some(p("b.png")), vec![]).unwrap();
        assert_eq!((i, o), (p("a.jpg"), p("b.png")));
    }

    #[test]
    fn too_many_positionals_rejected() {
        let err = resolve_paths(None, None, vec![p("a"), p("b"), p("c")]).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidArgument(msg) if msg.contains("too many")));
    }

    #[test]
    fn missing_input_rejected() {
        let err = resolve_paths(None, None, vec![p("b.png")]).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidArgument(msg) if msg.contains("input")));
    }

    #[test]
    fn missing_output_rejected() {
        let err = resolve_paths(Some(p("a.jpg")), None, vec![]).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidArgument(msg) if msg.contains("output")));
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "nim", "-i", "in.gif", "-o", "out.webp", "-s", "300x300", "-m", "STRETCH", "-q", "70",
            "-p", "#ff0000", "-f", "webp",
        ])
        .unwrap();
        assert_eq!(
            cli.size,
            Some(Size {
                width: 300,
                height: 300
            })
        );
        assert_eq!(cli.mode, Some(ResizeMode::Stretch));
        assert_eq!(cli.quality, Some(70));
        assert_eq!(cli.pad_color, Some(PadColor([255, 0, 0])));
        assert_eq!(cli.format.as_deref(), Some("webp"));
    }

    #[test]
    fn bad_size_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["nim", "a.jpg", "b.png", "-s", "300by300"]).is_err());
    }

    #[test]
    fn bad_pad_color_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["nim", "a.jpg", "b.png", "-p", "#12"]).is_err());
    }
}
