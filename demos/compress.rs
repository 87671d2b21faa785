//! Drive a compression session from the command line.
//!
//! ```text
//! cargo run --example compress -- photo.jpg --width 1200 --format webp --quality 0.7
//! RUST_LOG=imgsqueeze=debug cargo run --example compress -- photo.png --json
//! ```

use clap::{Parser, ValueEnum};
use imgsqueeze::config;
use imgsqueeze::imaging::OutputFormat;
use imgsqueeze::output::download_filename;
use imgsqueeze::types::DimensionField;
use imgsqueeze::Session;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Jpeg,
    Png,
    Webp,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Jpeg => OutputFormat::Jpeg,
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Webp => OutputFormat::WebP,
        }
    }
}

#[derive(Parser)]
#[command(name = "compress")]
#[command(about = "Resize and re-encode one image")]
struct Cli {
    /// Image to compress
    input: Option<PathBuf>,

    /// MIME type of the input (guessed from the extension if omitted)
    #[arg(long)]
    mime: Option<String>,

    /// Output encoding
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Quality as a fraction, 0.1 - 1.0
    #[arg(long)]
    quality: Option<f32>,

    /// Target width in pixels
    #[arg(long)]
    width: Option<String>,

    /// Target height in pixels
    #[arg(long)]
    height: Option<String>,

    /// Do not keep the aspect ratio
    #[arg(long)]
    unlock: bool,

    /// Directory containing imgsqueeze.toml
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,

    /// Where to write the output file
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Print the session view as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Print a stock imgsqueeze.toml with all options documented
    #[arg(long)]
    gen_config: bool,
}

fn guess_mime(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
    .to_string()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let Some(input) = cli.input else {
        return Err("no input image given".into());
    };

    let config = config::load_config(&cli.config_dir)?;
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            if let Ok(line) = serde_json::to_string(&event) {
                eprintln!("{}", line);
            }
        }
    });

    let mut session = Session::from_config(&config).with_events(tx);

    let mime = cli.mime.unwrap_or_else(|| guess_mime(&input));
    let bytes = std::fs::read(&input)?;
    session.load_file(bytes, &mime)?;

    if let Some(format) = cli.format {
        session.set_output_format(format.into());
    }
    if let Some(quality) = cli.quality {
        session.set_quality(quality);
    }
    if cli.unlock {
        session.toggle_aspect_lock();
    }
    if let Some(width) = &cli.width {
        session.edit_dimension(DimensionField::Width, width);
    }
    if let Some(height) = &cli.height {
        session.edit_dimension(DimensionField::Height, height);
    }

    let written = {
        let output = session.compress()?;
        std::fs::create_dir_all(&cli.out_dir)?;
        let path = cli.out_dir.join(download_filename(output.format()));
        std::fs::write(&path, output.bytes())?;
        path
    };

    let view = session.view();
    drop(session);
    printer.join().map_err(|_| "event printer panicked")?;

    if cli.json {
        println!("{}", view.to_json()?);
        return Ok(());
    }

    let labels = &view.labels;
    println!("{}", labels.quality);
    if let Some(size) = &labels.original_size {
        println!("Original:   {}", size);
    }
    if let Some(size) = &labels.compressed_size {
        match &labels.reduction {
            Some(reduction) => println!("Compressed: {} ({})", size, reduction),
            None => println!("Compressed: {}", size),
        }
    }
    if let Some(output) = &view.output {
        println!("Size:       {}x{}", output.width, output.height);
    }
    println!("Written:    {}", written.display());
    Ok(())
}
