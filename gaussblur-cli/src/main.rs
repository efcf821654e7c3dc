use clap::error::ErrorKind;
use clap::Parser;
use gaussblur::io::{load_raster, save_raster};
use gaussblur::{BenchConfig, BenchReport, BenchmarkHarness, TimingSample};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const BIN_NAME: &str = "timeblur";

#[derive(Parser, Debug)]
#[command(
    name = BIN_NAME,
    author,
    version,
    about = "Times the full 5x5 and separable Gaussian blurs on one image"
)]
struct Cli {
    /// Path to the source image.
    #[arg(value_name = "IMAGE")]
    image: PathBuf,
    /// Timed calls per variant.
    #[arg(short = 'n', long, default_value_t = gaussblur::harness::DEFAULT_REPETITIONS)]
    repetitions: usize,
    /// Directory for the blurred output images.
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
    /// File extension (and therefore format) of the output images.
    #[arg(long, default_value = "jpg")]
    format: String,
    /// Use the row-parallel convolvers (needs the `rayon` feature).
    #[arg(long)]
    parallel: bool,
    /// Also write the timing report as JSON to this file.
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Serialize)]
struct SampleRecord {
    variant: &'static str,
    id: &'static str,
    repetitions: usize,
    seconds_per_image: f64,
}

impl From<&TimingSample> for SampleRecord {
    fn from(value: &TimingSample) -> Self {
        Self {
            variant: value.variant.name(),
            id: value.variant.id(),
            repetitions: value.repetitions,
            seconds_per_image: value.seconds_per_image(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    image: String,
    parallel: bool,
    samples: Vec<SampleRecord>,
    artifacts: Vec<String>,
}

fn failure() -> ExitCode {
    // Matches `exit(-1)`: status 255.
    ExitCode::from(u8::MAX)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                eprintln!("Usage: {BIN_NAME} <image filename>");
                eprintln!("{err}");
                return failure();
            }
        },
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            failure()
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive("gaussblur=info".parse()?)
                    .add_directive("timeblur=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    let mut harness = BenchmarkHarness::new(BenchConfig {
        repetitions: cli.repetitions,
        parallel: cli.parallel,
    });
    harness
        .load_with(|| load_raster(&cli.image))
        .map_err(|err| format!("Unable to read image {}: {err}", cli.image.display()))?;

    let report = harness.run()?;

    fs::create_dir_all(&cli.out_dir)?;
    let artifacts = report.persist(|name, run| {
        println!("{}", run.sample.report_line());
        let path = cli.out_dir.join(format!("{name}.{}", cli.format));
        save_raster(&path, &run.output)?;
        println!("Saved blurred image: {}", path.display());
        tracing::info!(
            variant = run.sample.variant.name(),
            path = %path.display(),
            "artifact saved"
        );
        Ok(())
    })?;

    if let Some(path) = &cli.json {
        let output = build_output(&cli, &report, artifacts);
        fs::write(path, serde_json::to_string_pretty(&output)?)?;
        tracing::info!(path = %path.display(), "json report written");
    }

    println!("Terminating");
    Ok(())
}

fn build_output(cli: &Cli, report: &BenchReport, artifacts: Vec<String>) -> Output {
    Output {
        image: cli.image.display().to_string(),
        parallel: cli.parallel,
        samples: report
            .runs()
            .iter()
            .map(|run| SampleRecord::from(&run.sample))
            .collect(),
        artifacts: artifacts
            .into_iter()
            .map(|name| format!("{name}.{}", cli.format))
            .collect(),
    }
}
