use clap::Parser;
use cropmatch::io::{load_rgb_image, save_rgb_image};
use cropmatch::{BoxStyle, MatchConfig, MatchReport, Matcher, ScaleRange};
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Check whether one image is a scaled crop of the other"
)]
struct Cli {
    /// First image (PNG, JPEG or BMP).
    #[arg(required_unless_present = "print_example")]
    image_a: Option<PathBuf>,
    /// Second image (PNG, JPEG or BMP).
    #[arg(required_unless_present = "print_example")]
    image_b: Option<PathBuf>,
    /// Optional JSON file overriding matcher parameters.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Where to write the annotated canvas when a match is found.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for the scale sweep.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ScaleRangeJson {
    start: u32,
    end: u32,
    step: u32,
}

impl Default for ScaleRangeJson {
    fn default() -> Self {
        let range = ScaleRange::default();
        Self {
            start: range.start,
            end: range.end,
            step: range.step,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ConfigJson {
    threshold: f32,
    scales: ScaleRangeJson,
    downsample: f64,
    min_var_i: f64,
    box_color: [u8; 3],
    box_thickness: u32,
    parallel: bool,
}

impl Default for ConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            threshold: cfg.threshold,
            scales: ScaleRangeJson::default(),
            downsample: cfg.downsample,
            min_var_i: cfg.min_var_i,
            box_color: cfg.style.color.0,
            box_thickness: cfg.style.thickness,
            parallel: cfg.parallel,
        }
    }
}

impl From<ConfigJson> for MatchConfig {
    fn from(value: ConfigJson) -> Self {
        Self {
            threshold: value.threshold,
            scales: ScaleRange {
                start: value.scales.start,
                end: value.scales.end,
                step: value.scales.step,
            },
            downsample: value.downsample,
            min_var_i: value.min_var_i,
            style: BoxStyle {
                color: Rgb(value.box_color),
                thickness: value.box_thickness,
            },
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    score: f32,
    scale_pct: u32,
    canvas_box: [u32; 4],
    source_box: [u32; 4],
    image: String,
    template: String,
}

impl MatchRecord {
    fn new(report: &MatchReport, a: &str, b: &str) -> Self {
        let ((sx0, sy0), (sx1, sy1)) = report.source_box();
        let (image, template) = if report.swapped { (b, a) } else { (a, b) };
        Self {
            score: report.score,
            scale_pct: report.scale_pct,
            canvas_box: [
                report.top_left.0,
                report.top_left.1,
                report.bottom_right.0,
                report.bottom_right.1,
            ],
            source_box: [sx0, sy0, sx1, sy1],
            image: image.to_string(),
            template: template.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    is_crop: bool,
    #[serde(rename = "match")]
    found: Option<MatchRecord>,
}

fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let (Some(path_a), Some(path_b)) = (cli.image_a, cli.image_b) else {
        return Err("two image paths are required".into());
    };

    let cfg = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            MatchConfig::from(serde_json::from_str::<ConfigJson>(&text)?)
        }
        None => MatchConfig::default(),
    };
    let matcher = Matcher::new(cfg)?;

    let a = load_rgb_image(&path_a)?;
    let b = load_rgb_image(&path_b)?;
    tracing::info!(
        a_width = a.width(),
        a_height = a.height(),
        b_width = b.width(),
        b_height = b.height(),
        "inputs decoded"
    );

    let found = matcher.find(&a, &b)?;
    let record = found.as_ref().map(|found| {
        MatchRecord::new(
            &found.report,
            &path_a.display().to_string(),
            &path_b.display().to_string(),
        )
    });
    if let (Some(found), Some(path)) = (&found, &cli.output) {
        save_rgb_image(path, &found.canvas)?;
    }

    let output = Output {
        is_crop: record.is_some(),
        found: record,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(output.is_crop)
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("cropmatch=debug".parse()?))
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.trace {
        if let Err(err) = init_tracing() {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}
