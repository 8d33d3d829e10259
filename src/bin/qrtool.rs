use clap::{Args, Parser, Subcommand};
use qrgen::encoder::config;
use qrgen::{
    AsciiCharset, BatchJob, Color, ECLevel, ModuleStyle, OutputKind, QrEncoder, QrError,
    RenderSpec, Version,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR code generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a single symbol to a file or stdout
    Generate {
        #[command(flatten)]
        symbol: SymbolArgs,
        #[command(flatten)]
        render: RenderArgs,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the raw module grid as JSON
    Matrix {
        #[command(flatten)]
        symbol: SymbolArgs,
    },
    /// Render every item of a JSON job file into a ZIP archive
    Batch {
        /// Job file: {"items": [{"data": "...", "format": "SVG", ...}]}
        #[arg(long)]
        jobs: PathBuf,
        /// Archive to write
        #[arg(short, long, default_value = "qrcodes.zip")]
        output: PathBuf,
    },
    /// Show the version, EC level, mode and mask chosen for a payload
    Info {
        #[command(flatten)]
        symbol: SymbolArgs,
    },
}

#[derive(Args)]
struct SymbolArgs {
    /// Text to encode
    data: String,
    /// Error correction level (L, M, Q, H); defaults to QR_EC_LEVEL or M
    #[arg(short, long)]
    ec: Option<ECLevel>,
    /// Symbol version 1-40, 0 for the smallest that fits
    #[arg(long, default_value_t = 0)]
    version: u8,
}

impl SymbolArgs {
    fn ec_level(&self) -> ECLevel {
        self.ec.unwrap_or_default()
    }

    fn version(&self) -> Result<Option<Version>, QrError> {
        Version::from_request(self.version)
    }
}

#[derive(Args)]
struct RenderArgs {
    /// PNG, PURE_PNG, SVG, ASCII or MATRIX
    #[arg(short, long, default_value = "PNG")]
    format: OutputKind,
    /// Pixels per module; defaults to QR_BOX_SIZE or 10
    #[arg(long)]
    box_size: Option<u32>,
    /// Quiet zone in modules; defaults to QR_BORDER or 4
    #[arg(long)]
    border: Option<u32>,
    #[arg(long, default_value = "#000000")]
    fill_color: Color,
    #[arg(long, default_value = "#FFFFFF")]
    back_color: Color,
    /// standard or rounded
    #[arg(long, default_value = "standard")]
    style: ModuleStyle,
    /// Compact ASCII output, two module rows per line
    #[arg(long)]
    half_blocks: bool,
}

impl RenderArgs {
    fn spec(&self) -> RenderSpec {
        RenderSpec {
            box_size: self.box_size.unwrap_or_else(config::default_box_size),
            border: self.border.unwrap_or_else(config::default_border),
            fill: self.fill_color,
            background: self.back_color,
            kind: self.format,
            style: self.style,
            ascii: if self.half_blocks {
                AsciiCharset::HalfBlocks
            } else {
                AsciiCharset::Blocks
            },
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so symbols can be piped from stdout.
/// `RUST_LOG` wins; otherwise `QR_DEBUG` selects debug and the default is warn.
fn init_tracing() {
    let default = if config::debug_enabled() { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(command: Command) -> Result<(), QrError> {
    match command {
        Command::Generate {
            symbol,
            render,
            output,
        } => generate_cmd(&symbol, &render, output.as_deref()),
        Command::Matrix { symbol } => matrix_cmd(&symbol),
        Command::Batch { jobs, output } => batch_cmd(&jobs, &output),
        Command::Info { symbol } => info_cmd(&symbol),
    }
}

fn generate_cmd(
    symbol: &SymbolArgs,
    render: &RenderArgs,
    output: Option<&Path>,
) -> Result<(), QrError> {
    let spec = render.spec();
    let bytes = qrgen::generate_symbol(&symbol.data, symbol.ec_level(), symbol.version()?, &spec)?;
    match output {
        Some(path) => {
            std::fs::write(path, &bytes)?;
            eprintln!("Wrote {} ({})", path.display(), spec.kind.media_type());
        }
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(&bytes)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn matrix_cmd(symbol: &SymbolArgs) -> Result<(), QrError> {
    let rows = qrgen::generate_matrix(&symbol.data, symbol.ec_level(), symbol.version()?)?;
    println!("{}", serde_json::to_string(&rows)?);
    Ok(())
}

fn batch_cmd(jobs: &Path, output: &Path) -> Result<(), QrError> {
    let json = std::fs::read_to_string(jobs)?;
    let requests = BatchJob::from_json(&json)?.into_requests()?;
    // Nothing touches the disk unless every entry succeeded
    let archive = qrgen::generate_batch(&requests)?;
    std::fs::write(output, archive)?;
    println!("Wrote {} entries to {}", requests.len(), output.display());
    Ok(())
}

fn info_cmd(symbol: &SymbolArgs) -> Result<(), QrError> {
    let qr = QrEncoder::encode(&symbol.data, symbol.ec_level(), symbol.version()?)?;
    println!("version: {} ({}x{})", qr.version(), qr.size(), qr.size());
    println!("error_correction: {}", qr.error_correction());
    println!("mode: {}", qr.mode());
    println!("mask: {}", qr.mask_pattern().id());
    println!("dark_modules: {}", qr.modules().count_dark());
    Ok(())
}
