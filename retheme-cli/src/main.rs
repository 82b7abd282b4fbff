use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use retheme_core::palette::{all_palette_names, named_palette, DEFAULT_PALETTE_NAME};
use retheme_core::pipeline::process_file;
use retheme_core::{Palette, RethemeError};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "retheme",
    about = "Recolor images to the nearest colors of a fixed theme palette"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recolor a single image
    Single {
        /// Input image path (prompted for when omitted)
        input: Option<PathBuf>,

        /// Output image path (default: <input stem>_proc.png)
        output: Option<PathBuf>,

        #[command(flatten)]
        palette: PaletteArgs,
    },

    /// Recolor all images in a directory
    Batch {
        /// Input directory
        input_dir: PathBuf,

        /// Output directory (default: input_dir/rethemed)
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        palette: PaletteArgs,

        /// Run every built-in palette (one output per palette per image)
        #[arg(long, conflicts_with = "colors")]
        all_palettes: bool,

        /// Number of parallel jobs (default: num_cpus)
        #[arg(long, short)]
        jobs: Option<usize>,

        /// Reprocess even if output is up-to-date
        #[arg(long)]
        force: bool,
    },

    /// List built-in palettes
    Palettes,
}

#[derive(clap::Args)]
struct PaletteArgs {
    /// Palette name: kanagawa, nord, gruvbox
    #[arg(long, env = "RETHEME_PALETTE", default_value = DEFAULT_PALETTE_NAME)]
    palette: String,

    /// Custom colors as hex values, overrides --palette (e.g. "#16161D,#DCD7BA,#E82424")
    #[arg(long)]
    colors: Option<String>,
}

impl PaletteArgs {
    /// Label used in output filenames.
    fn label(&self) -> String {
        if self.colors.is_some() {
            "custom".to_string()
        } else {
            self.palette.to_lowercase()
        }
    }

    fn resolve(&self) -> Result<Palette> {
        if let Some(ref colors) = self.colors {
            let parts: Vec<&str> = colors.split(',').map(str::trim).collect();
            let palette = Palette::from_hex_list(parts.as_slice())
                .with_context(|| format!("invalid --colors '{}'", colors))?;
            // Custom RGB colors also apply to images with alpha
            return Ok(palette.opaque());
        }

        named_palette(&self.palette).ok_or_else(|| {
            anyhow!(
                "Unknown palette '{}'. Available: {}",
                self.palette,
                all_palette_names().join(", ")
            )
        })
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif", "tif", "tiff"];
const OUTPUT_SUFFIX: &str = "proc";

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_generated_file(path: &Path) -> bool {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    std::iter::once(OUTPUT_SUFFIX)
        .chain(std::iter::once("custom"))
        .chain(all_palette_names().iter().copied())
        .any(|suffix| stem.ends_with(&format!("_{}", suffix)))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

fn default_output_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("{}_{}.png", file_stem(input), OUTPUT_SUFFIX))
}

fn prompt_filename() -> Result<PathBuf> {
    let mut stdout = io::stdout();
    write!(stdout, "filename: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read filename")?;
    let name = line.trim();
    if name.is_empty() {
        bail!("no filename given");
    }
    Ok(PathBuf::from(name))
}

/// Output is newer than its input, so it can be skipped.
fn is_up_to_date(input: &Path, output: &Path) -> bool {
    let modified = |p: &Path| p.metadata().and_then(|m| m.modified()).ok();
    match (modified(input), modified(output)) {
        (Some(in_time), Some(out_time)) => out_time > in_time,
        _ => false,
    }
}

/// Returns false when the input file does not exist.
fn cmd_single(input: &Path, output: Option<&Path>, palette: &Palette) -> Result<bool> {
    let output_path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(input));

    eprintln!(
        "Processing: {} -> {}",
        input.display(),
        output_path.display()
    );

    match process_file(input, &output_path, palette) {
        Ok(()) => {
            println!("file saved as: {}", output_path.display());
            Ok(true)
        }
        Err(RethemeError::NotFound(path)) => {
            println!("file not found: {}", path.display());
            Ok(false)
        }
        Err(e) => Err(e).with_context(|| format!("failed to process {}", input.display())),
    }
}

fn cmd_batch(
    input_dir: &Path,
    output_dir: &Path,
    palettes: Vec<(String, Palette)>,
    jobs: Option<usize>,
    force: bool,
) -> Result<usize> {
    let mut images: Vec<PathBuf> = std::fs::read_dir(input_dir)
        .with_context(|| format!("failed to read {}", input_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_image_file(p) && !is_generated_file(p))
        .collect();
    images.sort();

    if images.is_empty() {
        eprintln!("No source images found in {}", input_dir.display());
        return Ok(0);
    }

    eprintln!(
        "Found {} source images, {} palettes",
        images.len(),
        palettes.len()
    );

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    if let Some(n) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .ok();
    }

    let mut work: Vec<(&Path, PathBuf, &str, &Palette)> = Vec::new();
    let mut skipped = 0usize;
    for image_path in &images {
        let stem = file_stem(image_path);
        for (name, palette) in &palettes {
            let output_path = output_dir.join(format!("{}_{}.png", stem, name));
            if !force && is_up_to_date(image_path, &output_path) {
                skipped += 1;
                continue;
            }
            work.push((image_path.as_path(), output_path, name.as_str(), palette));
        }
    }

    eprintln!(
        "To process: {} outputs, skipping {} up-to-date",
        work.len(),
        skipped
    );

    let errors: Vec<String> = work
        .par_iter()
        .filter_map(|(image_path, output_path, name, palette)| {
            eprintln!("  Applying [{}] -> {}", name, output_path.display());
            match process_file(image_path, output_path, palette) {
                Ok(()) => {
                    log::debug!("done: {}", output_path.display());
                    None
                }
                Err(e) => {
                    let msg = format!("{} [{}]: {}", image_path.display(), name, e);
                    eprintln!("  Error: {}", msg);
                    Some(msg)
                }
            }
        })
        .collect();

    eprintln!(
        "\nDone! Processed: {}, Skipped: {}, Errors: {}",
        work.len() - errors.len(),
        skipped,
        errors.len()
    );
    for e in &errors {
        eprintln!("  {}", e);
    }

    Ok(errors.len())
}

fn cmd_palettes() {
    for &name in all_palette_names() {
        if let Some(palette) = named_palette(name) {
            let marker = if name == DEFAULT_PALETTE_NAME {
                " (default)"
            } else {
                ""
            };
            println!("{}{}: {} colors", name, marker, palette.len());
            println!("  {}", palette.to_hex().join(" "));
        }
    }
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Single {
            input,
            output,
            palette,
        } => {
            let resolved = palette.resolve()?;
            let input = match input {
                Some(path) => path,
                None => prompt_filename()?,
            };
            let saved = cmd_single(&input, output.as_deref(), &resolved)?;
            Ok(if saved {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Batch {
            input_dir,
            output_dir,
            palette,
            all_palettes,
            jobs,
            force,
        } => {
            let output = output_dir.unwrap_or_else(|| input_dir.join("rethemed"));

            let palettes: Vec<(String, Palette)> = if all_palettes {
                all_palette_names()
                    .iter()
                    .filter_map(|&name| named_palette(name).map(|p| (name.to_string(), p)))
                    .collect()
            } else {
                vec![(palette.label(), palette.resolve()?)]
            };

            let failed = cmd_batch(&input_dir, &output, palettes, jobs, force)?;
            Ok(if failed == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Palettes => {
            cmd_palettes();
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("img/cat.jpg")),
            PathBuf::from("img/cat_proc.png")
        );
        assert_eq!(
            default_output_path(Path::new("photo.tar.png")),
            PathBuf::from("photo.tar_proc.png")
        );
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("a.PNG")));
        assert!(is_image_file(Path::new("a.jpeg")));
        assert!(!is_image_file(Path::new("a.txt")));
        assert!(!is_image_file(Path::new("README")));
    }

    #[test]
    fn test_is_generated_file() {
        assert!(is_generated_file(Path::new("cat_proc.png")));
        assert!(is_generated_file(Path::new("cat_nord.png")));
        assert!(is_generated_file(Path::new("cat_custom.png")));
        assert!(!is_generated_file(Path::new("cat.png")));
        assert!(!is_generated_file(Path::new("process.png")));
    }

    #[test]
    fn test_resolve_named_and_custom() {
        let named = PaletteArgs {
            palette: "nord".to_string(),
            colors: None,
        };
        assert_eq!(named.resolve().unwrap().len(), 16);
        assert_eq!(named.label(), "nord");

        let custom = PaletteArgs {
            palette: "nord".to_string(),
            colors: Some("#000000, #FFFFFF".to_string()),
        };
        let palette = custom.resolve().unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.color(1), &[255, 255, 255, 255]);
        assert_eq!(custom.label(), "custom");
    }

    #[test]
    fn test_label_matches_generated_names() {
        let args = PaletteArgs {
            palette: "Nord".to_string(),
            colors: None,
        };
        assert_eq!(args.label(), "nord");
        let output = format!("cat_{}.png", args.label());
        assert!(is_generated_file(Path::new(&output)));
    }

    #[test]
    fn test_all_palettes_conflicts_with_colors() {
        let parsed = Cli::try_parse_from([
            "retheme",
            "batch",
            "imgs",
            "--all-palettes",
            "--colors",
            "#000000",
        ]);
        assert!(parsed.is_err());

        assert!(Cli::try_parse_from(["retheme", "batch", "imgs", "--all-palettes"]).is_ok());
    }

    #[test]
    fn test_resolve_unknown_palette() {
        let args = PaletteArgs {
            palette: "solarized".to_string(),
            colors: None,
        };
        let err = args.resolve().unwrap_err().to_string();
        assert!(err.contains("kanagawa"));
    }

    #[test]
    fn test_single_missing_file_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let palette = named_palette("kanagawa").unwrap();
        let saved = cmd_single(&dir.path().join("missing.png"), None, &palette).unwrap();
        assert!(!saved);
    }

    #[test]
    fn test_batch_writes_and_skips() {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]))
            .save(dir.path().join("a.png"))
            .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        let out = dir.path().join("out");
        let palettes = vec![("kanagawa".to_string(), named_palette("kanagawa").unwrap())];

        let failed = cmd_batch(dir.path(), &out, palettes, None, false).unwrap();
        assert_eq!(failed, 0);
        let written = image::open(out.join("a_kanagawa.png")).unwrap().to_rgb8();
        assert_eq!(written.get_pixel(0, 0).0, [22, 22, 29]);
        assert!(!out.join("notes_kanagawa.png").exists());
    }
}
